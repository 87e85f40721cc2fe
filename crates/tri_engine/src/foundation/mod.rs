//! Foundation utilities shared by the renderer and the frame loop
//!
//! - **`math`**: nalgebra aliases and the few transforms the scene needs
//! - **`time`**: rotation accumulation and frame-rate statistics
//! - **`logging`**: `env_logger` setup

pub mod logging;
pub mod math;
pub mod time;
