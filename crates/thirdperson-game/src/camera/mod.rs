//! Camera rig module
//!
//! A spring arm (camera boom) behind the character with a follow camera on its end.

mod config;
mod rig;

pub use config::CameraConfig;
pub use rig::{CameraRig, CameraView, FollowCamera, SpringArm};
