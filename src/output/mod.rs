pub mod sox;
