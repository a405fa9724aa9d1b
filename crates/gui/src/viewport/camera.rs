use glam::{Mat4, Vec3, Vec4};

use super::picking::{Aabb, Ray};

/// Arc-ball camera for the editor viewport
#[derive(Clone, Copy, Debug)]
pub struct ArcBallCamera {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Vertical rotation angle (radians)
    pub pitch: f32,
    /// Distance from target
    pub distance: f32,
    /// Camera target point
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
}

impl Default for ArcBallCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcBallCamera {
    /// Camera at (0, 10, 10) looking at the origin
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: std::f32::consts::FRAC_PI_4,
            distance: 200.0_f32.sqrt(),
            target: Vec3::ZERO,
            fov: 90.0_f32.to_radians(),
        }
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx.to_radians();
        self.pitch = (self.pitch + dy.to_radians()).clamp(-1.5, 1.5);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta)).clamp(1.0, 150.0);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        let right = self.right_vector();
        let up = self.up_vector();
        let offset = right * dx + up * dy;
        self.target += offset;
    }

    /// Re-target the camera so that `bounds` fills most of the view
    pub fn frame(&mut self, bounds: &Aabb) {
        self.target = Vec3::new(bounds.center().x, 0.0, bounds.center().z);
        let radius = bounds.size().length() * 0.5;
        let fit = radius / (self.fov * 0.5).tan().max(0.1);
        self.distance = (fit * 1.5).clamp(4.0, 150.0);
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        let cy = self.yaw.cos();
        let sy = self.yaw.sin();
        let cp = self.pitch.cos();
        let sp = self.pitch.sin();

        self.target
            + Vec3::new(
                self.distance * cp * sy,
                self.distance * sp,
                self.distance * cp * cy,
            )
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, 0.1, 1000.0)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    fn right_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        fwd.cross(Vec3::Y).normalize_or_zero()
    }

    fn up_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        let right = self.right_vector();
        right.cross(fwd).normalize_or_zero()
    }

    /// Project a 3D point to 2D screen coords
    pub fn project(&self, point: Vec3, rect: egui::Rect) -> Option<egui::Pos2> {
        let aspect = rect.width() / rect.height();
        let vp = self.view_projection(aspect);
        let p = vp * Vec4::new(point.x, point.y, point.z, 1.0);
        if p.w <= 0.0 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        let screen_x = rect.center().x + ndc.x * rect.width() * 0.5;
        let screen_y = rect.center().y - ndc.y * rect.height() * 0.5;
        Some(egui::pos2(screen_x, screen_y))
    }

    /// Cast a ray from a screen position into the 3D scene.
    /// Returns None for a degenerate viewport.
    pub fn screen_ray(&self, screen_pos: egui::Pos2, rect: egui::Rect) -> Option<Ray> {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return None;
        }
        let aspect = rect.width() / rect.height();

        // Screen → NDC
        let ndc_x = (screen_pos.x - rect.center().x) / (rect.width() * 0.5);
        let ndc_y = -(screen_pos.y - rect.center().y) / (rect.height() * 0.5);

        // Inverse view-projection
        let vp_inv = self.view_projection(aspect).inverse();

        // Unproject near and far points
        let near_world = vp_inv * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far_world = vp_inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        let near = near_world.truncate() / near_world.w;
        let far = far_world.truncate() / far_world.w;

        let direction = (far - near).normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        Some(Ray {
            origin: self.eye_position(),
            direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn test_default_eye_position() {
        let cam = ArcBallCamera::new();
        let eye = cam.eye_position();
        assert!((eye - Vec3::new(0.0, 10.0, 10.0)).length() < 1e-3, "{eye:?}");
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let cam = ArcBallCamera::new();
        let rect = viewport();
        let ray = cam.screen_ray(rect.center(), rect).unwrap();
        let expected = (cam.target - cam.eye_position()).normalize();
        assert!(ray.direction.dot(expected) > 0.9999);
    }

    #[test]
    fn test_project_then_ray_roundtrip() {
        let cam = ArcBallCamera::new();
        let rect = viewport();
        let point = Vec3::new(3.0, 0.0, -2.0);
        let screen = cam.project(point, rect).unwrap();
        let ray = cam.screen_ray(screen, rect).unwrap();
        let to_point = (point - ray.origin).normalize();
        assert!(ray.direction.dot(to_point) > 0.9999);
    }

    #[test]
    fn test_degenerate_viewport_has_no_ray() {
        let cam = ArcBallCamera::new();
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(0.0, 600.0));
        assert!(cam.screen_ray(egui::pos2(0.0, 0.0), rect).is_none());
    }

    #[test]
    fn test_pitch_clamped() {
        let mut cam = ArcBallCamera::new();
        cam.rotate(0.0, 500.0);
        assert!(cam.pitch <= 1.5);
    }
}
