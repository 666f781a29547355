//! Light

use crate::geometry::*;
use crate::interaction::*;
use crate::pbrt::*;
use crate::scene::*;
use crate::spectrum::*;
use std::sync::Arc;

mod light_type;
mod visibility_tester;

// Re-export
pub use light_type::*;
pub use visibility_tester::*;

/// Return value for `Light::sample_li()`.
#[derive(Copy, Clone, Debug)]
pub struct Li {
    /// Incident direction.
    pub wi: Vector3f,

    /// PDF with respect to solid angle, or 1 for delta lights.
    pub pdf: Float,

    /// Visibility tester.
    pub visibility: Option<VisibilityTester>,

    /// Radiance arriving at intersection point.
    pub value: Spectrum,
}

impl Li {
    /// Return a new `Li`.
    ///
    /// * `wi`         - Incident direction.
    /// * `pdf`        - PDF.
    /// * `visibility` - Visibility tester.
    /// * `value`      - Radiance arriving at intersection point.
    pub fn new(
        wi: Vector3f,
        pdf: Float,
        visibility: Option<VisibilityTester>,
        value: Spectrum,
    ) -> Self {
        Self {
            wi,
            pdf,
            visibility,
            value,
        }
    }

    /// A sample that contributes nothing.
    pub fn zero() -> Self {
        Self::new(Vector3f::ZERO, 0.0, None, Spectrum::ZERO)
    }
}

/// Light trait provides common behavior.
pub trait Light {
    /// Initialize the light source once the scene is assembled and before
    /// rendering begins.
    ///
    /// * `scene` - The scene.
    fn preprocess(&self, _scene: &Scene) {}

    /// Returns the type of light.
    fn get_type(&self) -> LightType;

    /// Sample an incident direction at a reference point and return the
    /// radiance arriving along it with the shadow ray to test.
    ///
    /// * `hit` - The reference point.
    /// * `u`   - Sample value for Monte Carlo integration.
    fn sample_li(&self, hit: &Hit, u: &Point2f) -> Li;

    /// Returns the probability density with respect to solid angle for the
    /// light's `sample_li()`.
    ///
    /// * `hit` - The reference point.
    /// * `wi`  - The incident direction.
    fn pdf_li(&self, hit: &Hit, wi: &Vector3f) -> Float;

    /// Returns an estimate of the total emitted power. Only used to weight
    /// light selection.
    fn power(&self) -> Float;

    /// Returns emitted radiance due to that light along a ray that escapes the
    /// scene.
    ///
    /// * `ray` - The ray.
    fn le(&self, _ray: &Ray) -> Spectrum {
        Spectrum::ZERO
    }

    /// Returns the radiance emitted from a point on an area light in direction
    /// `w`.
    ///
    /// * `hit` - Point on the light surface.
    /// * `w`   - Outgoing direction.
    fn l(&self, _hit: &Hit, _w: &Vector3f) -> Spectrum {
        Spectrum::ZERO
    }

    /// Returns whether light source is a delta light.
    fn is_delta_light(&self) -> bool {
        self.get_type().is_delta_light()
    }
}

/// Atomic reference counted `Light`.
pub type ArcLight = Arc<dyn Light + Send + Sync>;
