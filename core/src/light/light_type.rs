//! Light Types

use bitflags::bitflags;

bitflags! {
    /// Stores combination of flags for the light types.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct LightType: u8 {
        const DELTA_POSITION_LIGHT = 1;
        const DELTA_DIRECTION_LIGHT = 2;
        const AREA_LIGHT = 4;
        const INFINITE_LIGHT = 8;
    }
}

impl LightType {
    /// Tests a single light type flag and returns whether it is set or not.
    ///
    /// * `other` - Light type flag to match.
    pub fn matches(&self, other: Self) -> bool {
        self.intersects(other)
    }

    /// Returns true if the light flags has the DELTA_POSITION_LIGHT or
    /// DELTA_DIRECTION_LIGHT flag set.
    pub fn is_delta_light(&self) -> bool {
        self.intersects(Self::DELTA_POSITION_LIGHT | Self::DELTA_DIRECTION_LIGHT)
    }

    /// Returns true for lights sampled as a whole-scene source (environment
    /// and distant lights) rather than bound to a primitive.
    pub fn is_global(&self) -> bool {
        self.intersects(Self::INFINITE_LIGHT | Self::DELTA_DIRECTION_LIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(LightType::DELTA_DIRECTION_LIGHT.is_delta_light());
        assert!(LightType::DELTA_DIRECTION_LIGHT.is_global());
        assert!(LightType::INFINITE_LIGHT.is_global());
        assert!(!LightType::INFINITE_LIGHT.is_delta_light());
        assert!(!LightType::AREA_LIGHT.is_global());
        assert!(LightType::AREA_LIGHT.matches(LightType::AREA_LIGHT | LightType::INFINITE_LIGHT));
    }
}
