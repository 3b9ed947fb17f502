use bytemuck::{Pod, Zeroable};
use nalgebra::{Matrix4, Orthographic3};

const NEAR: f32 = -100.0;
const FAR: f32 = 100.0;

// gl clip z in [-1, 1] to wgpu's [0, 1]
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Bounds of an orthographic view volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orthographic {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Orthographic {
    /// Unit volume stretched along the longer side of the framebuffer, so one world unit
    /// covers the same number of pixels horizontally and vertically.
    pub fn for_aspect(aspect: f32) -> Self {
        if aspect >= 1.0 {
            Self {
                left: -aspect,
                right: aspect,
                bottom: -1.0,
                top: 1.0,
                near: NEAR,
                far: FAR,
            }
        } else {
            let inverse = 1.0 / aspect;
            Self {
                left: -1.0,
                right: 1.0,
                bottom: -inverse,
                top: inverse,
                near: NEAR,
                far: FAR,
            }
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        Orthographic3::new(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
        .into_inner()
    }
}

pub struct Camera {
    pub projection: Orthographic,
}

impl Camera {
    pub fn new(projection: Orthographic) -> Self {
        Self { projection }
    }

    pub fn for_framebuffer(width: u32, height: u32) -> Self {
        Self::new(Orthographic::for_aspect(width as f32 / height as f32))
    }

    pub fn projection(&self) -> Matrix4<f32> {
        self.projection.matrix()
    }

    pub fn model_view_projection(&self, model: Matrix4<f32>) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * self.projection() * model
    }

    pub fn uniform(&self, model: Matrix4<f32>) -> CameraUniform {
        CameraUniform {
            mvp: self.model_view_projection(model).into(),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub mvp: [[f32; 4]; 4],
}

#[cfg(test)]
mod tests {
    use nalgebra::{Point3, Vector4};

    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn horizontal_extent_follows_aspect() {
        let narrow = Orthographic::for_aspect(4.0 / 3.0);
        let wide = Orthographic::for_aspect(16.0 / 9.0);

        assert!(close(narrow.width() / wide.width(), (4.0 / 3.0) / (16.0 / 9.0)));
        assert!(close(narrow.height(), wide.height()));
        assert!(close(narrow.height(), 2.0));

        // the matrix scales x by 2 / width, y by 2 / height
        let (pn, pw) = (narrow.matrix(), wide.matrix());
        assert!(close(pn[(0, 0)] / pw[(0, 0)], (16.0 / 9.0) / (4.0 / 3.0)));
        assert!(close(pn[(1, 1)], pw[(1, 1)]));
    }

    #[test]
    fn portrait_stretches_vertically() {
        let tall = Orthographic::for_aspect(0.5);
        assert!(close(tall.width(), 2.0));
        assert!(close(tall.height(), 4.0));
    }

    #[test]
    fn framebuffer_maps_to_clip_space() {
        let camera = Camera::for_framebuffer(640, 480);
        let mvp = camera.model_view_projection(Matrix4::identity());

        let corner = mvp * Point3::new(0.6, 0.9, 0.0).to_homogeneous();
        assert!(close(corner.x, 0.6 / (4.0 / 3.0)));
        assert!(close(corner.y, 0.9));
        assert!(close(corner.z, 0.5));
        assert!(close(corner.w, 1.0));

        let edge = mvp * Vector4::new(4.0 / 3.0, -1.0, 0.0, 1.0);
        assert!(close(edge.x, 1.0));
        assert!(close(edge.y, -1.0));
    }

    #[test]
    fn depth_range_is_zero_to_one() {
        let mvp = Camera::for_framebuffer(640, 480).model_view_projection(Matrix4::identity());

        let near = mvp * Point3::new(0.0, 0.0, -NEAR).to_homogeneous();
        let far = mvp * Point3::new(0.0, 0.0, -FAR).to_homogeneous();
        assert!(close(near.z, 0.0));
        assert!(close(far.z, 1.0));

        let plane = mvp * Point3::origin().to_homogeneous();
        assert!(plane.z > 0.0 && plane.z < 1.0);
    }

    #[test]
    fn uniform_is_column_major() {
        let camera = Camera::for_framebuffer(640, 480);
        let uniform = camera.uniform(Matrix4::identity());
        assert!(close(uniform.mvp[0][0], 3.0 / 4.0));
        assert!(close(uniform.mvp[1][1], 1.0));
        assert!(close(uniform.mvp[3][3], 1.0));
        assert_eq!(std::mem::size_of::<CameraUniform>(), 64);
    }
}
