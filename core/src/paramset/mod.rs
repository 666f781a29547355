//! Parameter Sets

use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;

/// Stores the values of a single named parameter.
#[derive(Clone, Debug)]
pub struct ParamSetItem<T> {
    /// The values.
    pub values: Vec<T>,

    /// Set once the parameter has been read.
    looked_up: Cell<bool>,
}

impl<T> ParamSetItem<T> {
    /// Returns a new `ParamSetItem`.
    ///
    /// * `values` - The values.
    pub fn new(values: Vec<T>) -> Self {
        Self {
            values,
            looked_up: Cell::new(false),
        }
    }
}

/// A hashmap of parameter sets stored by name.
pub type ParamSetMap<T> = HashMap<String, ParamSetItem<T>>;

/// Stores parameter set items of different types in hashmaps. Used to
/// construct integrators, materials, lights and shapes.
#[derive(Clone, Debug, Default)]
pub struct ParamSet {
    pub bools: ParamSetMap<bool>,
    pub ints: ParamSetMap<Int>,
    pub floats: ParamSetMap<Float>,
    pub point3fs: ParamSetMap<Point3f>,
    pub vector3fs: ParamSetMap<Vector3f>,
    pub normal3fs: ParamSetMap<Normal3f>,
    pub spectra: ParamSetMap<Spectrum>,
    pub strings: ParamSetMap<String>,
}

/// Define a macro that can be used to generate a function for adding/replacing
/// parameter set item.
macro_rules! paramset_add {
    ($func: ident, $t: ty, $paramset: ident) => {
        pub fn $func(&mut self, name: &str, values: &[$t]) {
            self.$paramset
                .insert(String::from(name), ParamSetItem::new(values.to_vec()));
        }
    };
}

/// Define a macro that can be used to generate a function for removing
/// parameter set item.
macro_rules! paramset_erase {
    ($func: ident, $paramset: ident) => {
        pub fn $func(&mut self, name: &str) -> bool {
            self.$paramset.remove(name).is_some()
        }
    };
}

/// Define a macro that can be used to generate a function for finding
/// parameter set item that is stored as a single item.
macro_rules! paramset_find_one {
    ($func: ident, $t: ty, $paramset: ident) => {
        pub fn $func(&self, name: &str, default: $t) -> $t {
            match self.$paramset.get(name) {
                Some(param) if param.values.len() == 1 => {
                    param.looked_up.set(true);
                    param.values[0].clone()
                }
                _ => default,
            }
        }
    };
}

/// Define a macro that can be used to generate a function for finding
/// parameter set item that is stored as a list.
macro_rules! paramset_find {
    ($func: ident, $t: ty, $paramset: ident) => {
        pub fn $func(&self, name: &str) -> Vec<$t> {
            match self.$paramset.get(name) {
                Some(param) => {
                    param.looked_up.set(true);
                    param.values.clone()
                }
                None => vec![],
            }
        }
    };
}

/// Define a macro that can be used to print parameter set items.
macro_rules! display_param {
    ($params: expr, $param_type: literal, $formatter: expr) => {
        let mut names: Vec<_> = $params.keys().collect();
        names.sort();
        for name in names {
            let param = &$params[name];
            write!($formatter, "\"{} {}\" [", $param_type, name)?;
            for (i, v) in param.values.iter().enumerate() {
                if i > 0 {
                    write!($formatter, " ")?;
                }
                write!($formatter, "{:?}", v)?;
            }
            writeln!($formatter, "]")?;
        }
    };
}

/// Define a macro that reports parameters that were never read.
macro_rules! report_unused_param {
    ($params: expr, $unused: ident) => {
        for (name, param) in $params.iter() {
            if !param.looked_up.get() {
                warn!("Parameter '{}' not used", name);
                $unused += 1;
            }
        }
    };
}

impl ParamSet {
    /// Returns a new `ParamSet`.
    pub fn new() -> Self {
        Self::default()
    }

    paramset_erase!(erase_int, ints);
    paramset_find_one!(find_one_int, Int, ints);
    paramset_find!(find_int, Int, ints);
    paramset_add!(add_int, Int, ints);

    paramset_erase!(erase_bool, bools);
    paramset_find_one!(find_one_bool, bool, bools);
    paramset_find!(find_bool, bool, bools);
    paramset_add!(add_bool, bool, bools);

    paramset_erase!(erase_float, floats);
    paramset_find_one!(find_one_float, Float, floats);
    paramset_find!(find_float, Float, floats);
    paramset_add!(add_float, Float, floats);

    paramset_erase!(erase_point3f, point3fs);
    paramset_find_one!(find_one_point3f, Point3f, point3fs);
    paramset_find!(find_point3f, Point3f, point3fs);
    paramset_add!(add_point3f, Point3f, point3fs);

    paramset_erase!(erase_vector3f, vector3fs);
    paramset_find_one!(find_one_vector3f, Vector3f, vector3fs);
    paramset_find!(find_vector3f, Vector3f, vector3fs);
    paramset_add!(add_vector3f, Vector3f, vector3fs);

    paramset_erase!(erase_normal3f, normal3fs);
    paramset_find_one!(find_one_normal3f, Normal3f, normal3fs);
    paramset_find!(find_normal3f, Normal3f, normal3fs);
    paramset_add!(add_normal3f, Normal3f, normal3fs);

    paramset_erase!(erase_string, strings);
    paramset_find_one!(find_one_string, String, strings);
    paramset_find!(find_string, String, strings);
    paramset_add!(add_string, String, strings);

    paramset_erase!(erase_spectrum, spectra);
    paramset_find_one!(find_one_spectrum, Spectrum, spectra);
    paramset_find!(find_spectrum, Spectrum, spectra);
    paramset_add!(add_spectrum, Spectrum, spectra);

    /// Add RGB values as a spectrum.
    ///
    /// * `name`   - Parameter name.
    /// * `values` - RGB triples.
    pub fn add_rgb_spectrum(&mut self, name: &str, values: &[Float]) {
        assert!(values.len() % 3 == 0, "RGB spectrum needs triples of values");
        let s: Vec<Spectrum> = values
            .chunks(3)
            .map(|rgb| Spectrum::from_rgb(rgb[0], rgb[1], rgb[2]))
            .collect();
        self.add_spectrum(name, &s);
    }

    /// Logs a warning for every parameter that was never looked up and returns
    /// how many there were.
    pub fn report_unused(&self) -> usize {
        let mut unused = 0;
        report_unused_param!(self.bools, unused);
        report_unused_param!(self.ints, unused);
        report_unused_param!(self.floats, unused);
        report_unused_param!(self.point3fs, unused);
        report_unused_param!(self.vector3fs, unused);
        report_unused_param!(self.normal3fs, unused);
        report_unused_param!(self.spectra, unused);
        report_unused_param!(self.strings, unused);
        unused
    }
}

impl fmt::Display for ParamSet {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_param!(self.bools, "bool", f);
        display_param!(self.ints, "integer", f);
        display_param!(self.floats, "float", f);
        display_param!(self.point3fs, "point3", f);
        display_param!(self.vector3fs, "vector3", f);
        display_param!(self.normal3fs, "normal", f);
        display_param!(self.spectra, "rgb", f);
        display_param!(self.strings, "string", f);
        Ok(())
    }
}
