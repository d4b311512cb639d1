// SPDX-License-Identifier: MPL-2.0
//! Float assertions shared by unit tests.

pub use approx::assert_abs_diff_eq;
