//! BxDF Type

use bitflags::bitflags;

bitflags! {
    /// Stores combinations of reflection models.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct BxDFType: u8 {
        const REFLECTION = 0b00000001;
        const TRANSMISSION = 0b00000010;
        const DIFFUSE = 0b00000100;
        const GLOSSY = 0b00001000;
        const SPECULAR = 0b00010000;
    }
}

impl BxDFType {
    /// Tests a single type flag and returns whether it is set or not.
    ///
    /// * `flag` - BxDFType flag.
    pub fn matches(&self, flag: Self) -> bool {
        self.intersects(flag)
    }

    /// Returns true if every flag of this type is also set in `flags`.
    ///
    /// * `flags` - The flags to test against.
    pub fn matches_flags(&self, flags: Self) -> bool {
        flags.contains(*self)
    }

    /// Returns true if the type has the specular flag.
    pub fn is_specular(&self) -> bool {
        self.contains(Self::SPECULAR)
    }

    /// Returns all types except specular.
    pub fn non_specular() -> Self {
        Self::all() - Self::SPECULAR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_flags_requires_subset() {
        let t = BxDFType::REFLECTION | BxDFType::DIFFUSE;
        assert!(t.matches_flags(BxDFType::all()));
        assert!(t.matches_flags(BxDFType::non_specular()));
        assert!(!t.matches_flags(BxDFType::REFLECTION));
        assert!(t.matches(BxDFType::REFLECTION));
    }

    #[test]
    fn non_specular_excludes_specular() {
        let t = BxDFType::REFLECTION | BxDFType::SPECULAR;
        assert!(t.is_specular());
        assert!(!t.matches_flags(BxDFType::non_specular()));
    }
}
