use std::fmt;
use std::str::FromStr;

/// Affinity returned for unknown signs and unset table cells
pub const DEFAULT_SIGN_AFFINITY: f64 = 0.5;

/// Affinity by distance between two signs around the wheel (0-6 signs apart)
///
/// Trines (4) score highest, followed by sextiles (2) and oppositions (6).
/// Squares (3) are neutral; quincunx (5) is the weakest pairing.
const AFFINITY_BY_SEPARATION: [f64; 7] = [0.7, 0.6, 0.8, 0.5, 0.9, 0.4, 0.8];

/// The twelve zodiac signs in wheel order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    /// Number of signs between `self` and `other` going the short way round (0-6)
    #[inline]
    pub fn separation(self, other: ZodiacSign) -> usize {
        let diff = self.index().abs_diff(other.index());
        diff.min(12 - diff)
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for labels that are not one of the twelve signs
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown zodiac sign: {0}")]
pub struct UnknownSign(pub String);

impl FromStr for ZodiacSign {
    type Err = UnknownSign;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        ZodiacSign::ALL
            .iter()
            .copied()
            .find(|sign| sign.name().eq_ignore_ascii_case(label))
            .ok_or_else(|| UnknownSign(s.to_string()))
    }
}

/// Directional sun-sign affinity table
///
/// Lookups go user sign first, then partner sign. Every cell is either set to
/// an affinity in [0, 1] or unset, in which case the table default applies.
#[derive(Debug, Clone, PartialEq)]
pub struct SunSignTable {
    cells: [[Option<f64>; 12]; 12],
    default_affinity: f64,
}

impl SunSignTable {
    /// An empty table where every lookup yields `default_affinity`
    pub fn sparse(default_affinity: f64) -> Self {
        Self {
            cells: [[None; 12]; 12],
            default_affinity: default_affinity.clamp(0.0, 1.0),
        }
    }

    /// A fully populated, symmetric table derived from sign separation
    pub fn generated() -> Self {
        let mut table = Self::sparse(DEFAULT_SIGN_AFFINITY);
        for sign in ZodiacSign::ALL {
            for partner in ZodiacSign::ALL {
                table.set(sign, partner, AFFINITY_BY_SEPARATION[sign.separation(partner)]);
            }
        }
        table
    }

    /// Replace the fallback used for unknown signs and unset cells
    pub fn with_default_affinity(mut self, default_affinity: f64) -> Self {
        self.default_affinity = default_affinity.clamp(0.0, 1.0);
        self
    }

    /// Set a single directional cell
    pub fn set(&mut self, sign: ZodiacSign, partner: ZodiacSign, affinity: f64) {
        self.cells[sign.index()][partner.index()] = Some(affinity.clamp(0.0, 1.0));
    }

    /// Set both directions of a pair
    pub fn set_pair(&mut self, a: ZodiacSign, b: ZodiacSign, affinity: f64) {
        self.set(a, b, affinity);
        self.set(b, a, affinity);
    }

    pub fn default_affinity(&self) -> f64 {
        self.default_affinity
    }

    /// Affinity between two signs
    #[inline]
    pub fn lookup(&self, sign: ZodiacSign, partner: ZodiacSign) -> f64 {
        self.cells[sign.index()][partner.index()].unwrap_or(self.default_affinity)
    }

    /// Affinity between two sign labels; unknown labels yield the default.
    ///
    /// Labels are matched ignoring ASCII case and surrounding whitespace, so
    /// `"aries"` scores the same as `"Aries"`.
    pub fn affinity(&self, user_sign: &str, partner_sign: &str) -> f64 {
        match (user_sign.parse::<ZodiacSign>(), partner_sign.parse::<ZodiacSign>()) {
            (Ok(sign), Ok(partner)) => self.lookup(sign, partner),
            _ => {
                tracing::debug!(
                    "Unknown sun sign pair ({}, {}), using default affinity",
                    user_sign,
                    partner_sign
                );
                self.default_affinity
            }
        }
    }
}

impl Default for SunSignTable {
    fn default() -> Self {
        Self::generated()
    }
}
