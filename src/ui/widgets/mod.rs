// SPDX-License-Identifier: MPL-2.0
pub mod animated_spinner;
pub mod pan_surface;

pub use animated_spinner::AnimatedSpinner;
pub use pan_surface::pan_surface;
