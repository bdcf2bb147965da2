// modules for making sounds
pub mod morse;
pub mod synth;
pub mod timing;
pub mod wave;

// Practicing
pub mod practice;
pub mod session;
pub mod settings;

// Talking to the outside world
pub mod output;
