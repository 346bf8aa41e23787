// orientation.rs - camera orientation and drag gestures

use glam::DVec3;

/// Longitude added per frame while nobody holds the view.
pub const AUTO_ROTATE_STEP: f64 = 0.1;
/// Degrees per pixel of drag.
pub const DRAG_SCALE: f64 = 0.1;
pub const LATITUDE_LIMIT: f64 = 85.0;
/// Radius of the sphere the look-at target lives on.
pub const LOOK_RADIUS: f64 = 500.0;

pub const START_LONGITUDE: f64 = 90.0;
pub const START_LATITUDE: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub page_x: f64,
    pub page_y: f64,
}

/// Pointer position and view angles captured when a gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub x: f64,
    pub y: f64,
    pub lon: f64,
    pub lat: f64,
}

impl DragState {
    /// New (lon, lat) for the pointer at (x, y), relative to the gesture start.
    fn angles_at(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (self.x - x) * DRAG_SCALE + self.lon,
            (y - self.y) * DRAG_SCALE + self.lat,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Orientation {
    lon: f64,
    lat: f64,
    phi: f64,
    theta: f64,
    held_by_user: bool,
    mouse_down: Option<DragState>,
    touch_start: Option<DragState>,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::starting_at(START_LONGITUDE, START_LATITUDE)
    }
}

impl Orientation {
    pub fn starting_at(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            phi: 0.0,
            theta: 0.0,
            held_by_user: false,
            mouse_down: None,
            touch_start: None,
        }
    }

    pub fn longitude(&self) -> f64 {
        self.lon
    }

    pub fn latitude(&self) -> f64 {
        self.lat
    }

    /// Polar angle in radians, as of the last `advance`.
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Azimuth in radians, as of the last `advance`.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn is_held(&self) -> bool {
        self.held_by_user
    }

    /// Per-frame update. Returns the point the camera should look at.
    ///
    /// Longitude only wraps at the top (`>= 360` becomes `0`); a drag can leave it negative.
    pub fn advance(&mut self) -> DVec3 {
        if !self.held_by_user {
            self.lon += AUTO_ROTATE_STEP;
        }
        if self.lon >= 360.0 {
            self.lon = 0.0;
        }

        self.lat = self.lat.clamp(-LATITUDE_LIMIT, LATITUDE_LIMIT);
        self.phi = (90.0 - self.lat).to_radians();
        self.theta = self.lon.to_radians();

        DVec3::new(
            LOOK_RADIUS * self.phi.sin() * self.theta.cos(),
            LOOK_RADIUS * self.phi.cos(),
            LOOK_RADIUS * self.phi.sin() * self.theta.sin(),
        )
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.held_by_user = true;
        self.mouse_down = Some(self.snapshot(x, y));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if !self.held_by_user {
            return;
        }
        if let Some(start) = self.mouse_down {
            (self.lon, self.lat) = start.angles_at(x, y);
        }
    }

    pub fn pointer_up(&mut self) {
        self.mouse_down = None;
        self.held_by_user = false;
    }

    /// Any touch holds the view; only a single finger starts a drag.
    pub fn touch_start(&mut self, touches: &[TouchPoint]) {
        self.held_by_user = true;
        if let [touch] = touches {
            self.touch_start = Some(self.snapshot(touch.page_x, touch.page_y));
        }
    }

    pub fn touch_move(&mut self, touches: &[TouchPoint]) {
        if !self.held_by_user {
            return;
        }
        if let ([touch], Some(start)) = (touches, self.touch_start) {
            (self.lon, self.lat) = start.angles_at(touch.page_x, touch.page_y);
        }
    }

    pub fn touch_end(&mut self) {
        self.touch_start = None;
        self.held_by_user = false;
    }

    fn snapshot(&self, x: f64, y: f64) -> DragState {
        DragState {
            x,
            y,
            lon: self.lon,
            lat: self.lat,
        }
    }
}
