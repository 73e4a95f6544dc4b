//! Angle helpers and heading reference

/// Wrap an angle into `[0, 360)` degrees.
///
/// Handles any number of turns in either direction, unlike a single
/// `±360` correction.
pub fn wrap_360(angle: f32) -> f32 {
    let mut wrapped = libm::fmodf(angle, 360.0);
    if wrapped < 0.0 {
        wrapped += 360.0;
    }
    // -1e-6 + 360.0 rounds to 360.0 in f32
    if wrapped >= 360.0 {
        wrapped -= 360.0;
    }
    // fmodf keeps the sign of a negative exact multiple: -720 gives -0.0
    wrapped + 0.0
}

/// Wrap an angle into `(-180, 180]` degrees.
pub fn wrap_180(angle: f32) -> f32 {
    let wrapped = wrap_360(angle);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// User-selected zero heading.
///
/// Before a reference is set, [`HeadingReference::relative`] passes the
/// absolute yaw through unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeadingReference {
    offset: Option<f32>,
}

impl HeadingReference {
    /// No reference set
    pub const fn new() -> Self {
        Self { offset: None }
    }

    /// Make `yaw` the new zero heading
    pub fn set(&mut self, yaw: f32) {
        self.offset = Some(yaw);
    }

    /// Forget the reference
    pub fn clear(&mut self) {
        self.offset = None;
    }

    /// Whether a reference has been set
    pub fn is_set(&self) -> bool {
        self.offset.is_some()
    }

    /// Heading relative to the reference, in `(-180, 180]`
    pub fn relative(&self, yaw: f32) -> f32 {
        match self.offset {
            Some(offset) => wrap_180(yaw - offset),
            None => yaw,
        }
    }
}
