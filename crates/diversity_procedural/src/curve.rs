//! # Keyframed Curves
//!
//! Hermite curves used for atmosphere pressure and temperature profiles.
//! Keys are `(time, value, in_tangent, out_tangent)`; time is the normalised
//! altitude, value a multiplier of the sea-level quantity.

use serde::{Deserialize, Serialize};

/// One curve key.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Position along the curve.
    pub time: f32,
    /// Value at `time`.
    pub value: f32,
    /// Incoming slope.
    #[serde(default)]
    pub in_tangent: f32,
    /// Outgoing slope.
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    /// Creates a key.
    #[must_use]
    pub const fn new(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }

    /// Parses `"time value in out"`; missing tangents default to zero.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut fields = text.split_whitespace().map(str::parse::<f32>);
        let time = fields.next()?.ok()?;
        let value = fields.next()?.ok()?;
        let in_tangent = fields.next().transpose().ok()?.unwrap_or(0.0);
        let out_tangent = fields.next().transpose().ok()?.unwrap_or(0.0);
        Some(Self::new(time, value, in_tangent, out_tangent))
    }
}

/// A curve over sorted keys.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FloatCurve {
    /// Keys in ascending time order.
    pub keys: Vec<Keyframe>,
}

impl FloatCurve {
    /// Creates a curve, sorting the keys by time.
    #[must_use]
    pub fn new(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Returns a copy with every value multiplied by `factor`.
    ///
    /// Tangents are kept as they are.
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            keys: self
                .keys
                .iter()
                .map(|k| Keyframe { value: k.value * factor, ..*k })
                .collect(),
        }
    }

    /// Evaluates the curve, clamping outside the key range.
    #[must_use]
    pub fn evaluate(&self, time: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        for pair in self.keys.windows(2) {
            let (k0, k1) = (pair[0], pair[1]);
            if time > k1.time {
                continue;
            }
            let dt = k1.time - k0.time;
            if dt <= 0.0 {
                return k1.value;
            }
            let s = (time - k0.time) / dt;
            let s2 = s * s;
            let s3 = s2 * s;
            let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
            let h10 = s3 - 2.0 * s2 + s;
            let h01 = -2.0 * s3 + 3.0 * s2;
            let h11 = s3 - s2;
            return h00 * k0.value
                + h10 * k0.out_tangent * dt
                + h01 * k1.value
                + h11 * k1.in_tangent * dt;
        }
        last.value
    }
}

/// A matched pressure/temperature curve pair for a synthesised atmosphere.
#[derive(Clone, Copy, Debug)]
pub struct AtmosphereTemplate {
    /// Descriptive template name.
    pub name: &'static str,
    /// Pressure multiplier by normalised altitude.
    pub pressure: &'static [Keyframe],
    /// Temperature multiplier by normalised altitude.
    pub temperature: &'static [Keyframe],
}

impl AtmosphereTemplate {
    /// The pressure curve.
    #[must_use]
    pub fn pressure_curve(&self) -> FloatCurve {
        FloatCurve::new(self.pressure.to_vec())
    }

    /// The temperature curve.
    #[must_use]
    pub fn temperature_curve(&self) -> FloatCurve {
        FloatCurve::new(self.temperature.to_vec())
    }
}

const fn k(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Keyframe {
    Keyframe::new(time, value, in_tangent, out_tangent)
}

/// Atmosphere profiles a new atmosphere is drawn from.
pub const ATMOSPHERE_TEMPLATES: &[AtmosphereTemplate] = &[
    AtmosphereTemplate {
        name: "thin arid",
        pressure: &[
            k(0.0, 1.0, 0.0, -0.0007),
            k(0.24, 0.188_897_1, -0.000_223, -0.000_223),
            k(0.4, 0.035_677_28, -4.22E-05, -4.22E-05),
            k(0.7, 0.002_220_577, -2.787_075E-06, -2.787_075E-06),
            k(1.0, 0.0, 0.0, 0.0),
        ],
        temperature: &[
            k(0.0, 0.932, 0.0, -0.000_426_112_6),
            k(0.02, 0.9312, -0.000_573_325, -0.000_573_325),
            k(0.5, 0.6148, -0.001_877_083, -0.001_877_083),
            k(0.6, 0.6, 0.0, 0.0),
            k(0.9, 0.6, 0.0, 0.0),
            k(1.0, 0.64, 0.003_746_914, 0.0),
        ],
    },
    AtmosphereTemplate {
        name: "dense hot",
        pressure: &[
            k(0.0, 1.0, -0.086_935_77, -0.086_935_77),
            k(0.108_039_2, 0.224_031_6, -0.014_940_8, -0.014_940_8),
            k(0.222_222_2, 0.047_372_32, -0.001_997_488, -0.001_997_488),
            k(0.333_333_3, 0.009_869_233, -0.000_917_600_3, -0.000_917_600_3),
            k(0.5, 0.000_986_923_2, -3.677_358E-05, -3.677_358E-05),
            k(0.888_888_9, 4.539_847E-06, -6.030_081E-07, -6.030_081E-07),
            k(1.0, 0.0, 0.0, 0.0),
        ],
        temperature: &[
            k(0.0, 1.029_412, 0.0, -0.010_293_38),
            k(0.166_666_7, 0.686_274_5, -0.004_705_439, -0.004_705_439),
            k(0.555_555_6, 0.441_176_5, 0.0, 0.0),
            k(0.666_666_7, 0.465_686_3, 0.0, 0.0),
            k(0.777_777_8, 0.392_156_9, 0.0, 0.0),
            k(1.0, 0.612_745_1, 0.005_894_589, 0.0),
        ],
    },
    AtmosphereTemplate {
        name: "giant",
        pressure: &[
            k(0.0, 1.0, 0.0, -0.057_534_74),
            k(0.145, 0.413_220_6, -0.014_492_55, -0.014_492_55),
            k(0.617_25, 0.014_645_94, -0.001_562_163, -0.001_562_163),
            k(0.75, 0.001_315_898, -0.000_136_146_5, -0.000_136_146_5),
            k(0.85, 6.579_488E-05, -1.001_277E-05, -1.001_277E-05),
            k(1.0, 0.0, 0.0, 0.0),
        ],
        temperature: &[
            k(0.0, 1.0, 0.0, -0.001_182_922),
            k(0.145, 0.825, -0.001_207_278, -0.001_207_278),
            k(0.617_25, 0.6, 0.0, 0.0),
            k(0.84, 0.8, 0.000_996_794_4, 0.000_996_794_4),
            k(0.9375, 0.875, 0.0, 0.0),
            k(0.97, 0.835, 0.0, 0.0),
            k(1.0, 1.75, 0.087_174_71, 0.0),
        ],
    },
    AtmosphereTemplate {
        name: "temperate",
        pressure: &[
            k(0.0, 1.0, 0.0, -0.015_016_31),
            k(0.017_728_93, 0.829_303_3, -0.012_898_46, -0.012_898_26),
            k(0.034_851_33, 0.687_701_8, -0.011_078_76, -0.011_078_59),
            k(0.051_387_29, 0.570_244_4, -0.009_515_483, -0.009_515_338),
            k(0.067_356_31, 0.472_821_3, -0.008_172_54, -0.008_172_415),
            k(0.082_777_28, 0.392_020_6, -0.007_018_92, -0.007_018_813),
            k(0.097_668_45, 0.325_010_5, -0.006_027_969, -0.006_027_877),
            k(0.112_047_5, 0.269_440_8, -0.005_176_778, -0.005_176_7),
            k(0.125_931_7, 0.223_361_1, -0.004_445_662, -0.004_445_578),
            k(0.154_091_7, 0.151_674_3, -0.003_016_528, -0.003_016_46),
            k(0.172_877_1, 0.117_178_7, -0.002_329_273, -0.002_329_22),
            k(0.191_672_1, 0.090_528_48, -0.001_798_594, -0.001_798_554),
            k(0.238_263_9, 0.047_789_4, -0.000_944_853_7, -0.000_944_831_9),
            k(0.302_044_3, 0.020_232_88, -0.000_389_409_5, -0.000_389_400_5),
            k(0.385_398_9, 0.006_815_622, -0.000_125_256_5, -0.000_125_253_4),
            k(0.479_911_7, 0.002_172_943, -3.626_878E-05, -3.626_788E-05),
            k(0.601_169_6, 0.000_569_303_6, -9.063_159E-06, -9.062_975E-06),
            k(0.704_459, 0.000_173_086, -3.029_397E-06, -3.029_335E-06),
            k(0.809_570_7, 4.531_778E-05, -8.827_175E-07, -8.826_996E-07),
            k(0.890_012, 1.477_495E-05, -3.077_091E-07, -3.077_031E-07),
            k(1.0, 0.0, 0.0, 0.0),
        ],
        temperature: &[
            k(0.0, 1.004_007, 0.0, -0.008_125),
            k(0.125_931_7, 0.754_878, -0.008_096_968, 0.0),
            k(0.229_291_3, 0.754_878, 0.0, 0.001_242_164),
            k(0.367_560_4, 0.796_689_9, 0.001_237_475, 0.003_464_929),
            k(0.541_134_9, 0.943_031_3, 0.003_448_55, 0.0),
            k(0.587_560_5, 0.943_031_3, 0.0, -0.003_444_189),
            k(0.820_573_3, 0.747_909_4, -0.003_422_425, -0.002_444_589),
            k(0.982_826_9, 0.651_379_8, -0.002_433_851, 0.0),
            k(1.0, 0.651_379_8, 0.0, 0.0),
        ],
    },
    AtmosphereTemplate {
        name: "oceanic",
        pressure: &[
            k(0.0, 0.999_999_9, 0.0, -0.005_216_384),
            k(0.105, 0.549_535, -0.004_252_711, -0.004_252_711),
            k(0.2, 0.292_557_8, -0.002_407_767, -0.002_407_767),
            k(0.34, 0.116_795_4, -0.001_092_064, -0.001_092_064),
            k(0.44, 0.062_709_45, -0.000_467_701_1, -0.000_467_701_1),
            k(0.62, 0.021_588_65, -0.000_196_176_7, -0.000_196_176_7),
            k(0.76, 0.008_395_517, -7.855_808E-05, -7.855_808E-05),
            k(1.0, 0.0, 0.0, 0.0),
        ],
        temperature: &[
            k(0.0, 0.982_269_5, 0.0, -0.009_285_714),
            k(0.105, 0.730_496_5, -0.009_253_677, 0.0),
            k(0.2, 0.730_496_5, 0.0, 0.001_419_616),
            k(0.34, 0.772_340_4, 0.001_414_257, 0.003_959_919),
            k(0.44, 0.835_106_4, 0.003_941_2, -0.000_258_154_2),
            k(0.62, 0.719_858_2, -0.003_911_343, -0.000_762_320_9),
            k(0.76, 0.705_673_8, 0.0, 0.001_478_429),
            k(1.0, 0.758_865_2, 0.0, 0.0),
        ],
    },
];
