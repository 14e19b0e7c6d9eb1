use crate::models::BirthChart;

/// Score returned when no planet forms a recognised aspect
pub const NEUTRAL_ASPECT_SCORE: f64 = 50.0;

/// Planets compared in premium chart scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Planet {
    Sun,
    Moon,
    Venus,
    Mars,
}

impl Planet {
    pub const TRACKED: [Planet; 4] = [Planet::Sun, Planet::Moon, Planet::Venus, Planet::Mars];

    /// Key used for the planet in birth chart data
    pub fn name(self) -> &'static str {
        match self {
            Planet::Sun => "Sun",
            Planet::Moon => "Moon",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
        }
    }
}

/// Angular relationship between two planetary positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aspect {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl Aspect {
    /// Classify an angle in degrees. Buckets are inclusive and checked in
    /// order; the first match wins.
    pub fn classify(angle: f64) -> Option<Aspect> {
        if angle < 10.0 {
            Some(Aspect::Conjunction)
        } else if (55.0..=65.0).contains(&angle) {
            Some(Aspect::Sextile)
        } else if (85.0..=95.0).contains(&angle) {
            Some(Aspect::Square)
        } else if (115.0..=125.0).contains(&angle) {
            Some(Aspect::Trine)
        } else if (175.0..=185.0).contains(&angle) {
            Some(Aspect::Opposition)
        } else {
            None
        }
    }

    /// Fixed affinity (0-1) carried by the aspect
    pub fn affinity(self) -> f64 {
        match self {
            Aspect::Conjunction => 1.0,
            Aspect::Sextile => 0.8,
            Aspect::Square => 0.4,
            Aspect::Trine => 0.9,
            Aspect::Opposition => 0.5,
        }
    }
}

/// Absolute angular distance between two positions, reduced mod 360
#[inline]
pub fn angular_distance(a: f64, b: f64) -> f64 {
    (a - b).abs() % 360.0
}

/// Mean affinity of the classified aspects scaled to 0-100, or the neutral
/// score when nothing classified
fn mean_affinity(aspects: impl Iterator<Item = Aspect>) -> f64 {
    let (total, count) = aspects.fold((0.0, 0usize), |(total, count), aspect| {
        (total + aspect.affinity(), count + 1)
    });

    if count > 0 {
        total / count as f64 * 100.0
    } else {
        NEUTRAL_ASPECT_SCORE
    }
}

/// Score planetary aspects between two charts (0-100)
///
/// Each tracked planet's positions (0 when absent) are compared; angles that
/// fall outside every aspect bucket are left out of the average entirely.
pub fn calculate_aspect_compatibility(user_chart: &BirthChart, partner_chart: &BirthChart) -> f64 {
    mean_affinity(Planet::TRACKED.iter().filter_map(|&planet| {
        let angle = angular_distance(user_chart.position(planet), partner_chart.position(planet));
        let aspect = Aspect::classify(angle);
        tracing::trace!("{} angle {:.2} -> {:?}", planet.name(), angle, aspect);
        aspect
    }))
}

/// Score house placements between two charts (0-100)
///
/// Houses are 30° segments of the wheel, so the separation between the two
/// house numbers is turned into an angle and classified like an aspect.
/// Planets without a house on both charts are skipped.
pub fn calculate_house_compatibility(user_chart: &BirthChart, partner_chart: &BirthChart) -> f64 {
    mean_affinity(Planet::TRACKED.iter().filter_map(|&planet| {
        let user_house = user_chart.house(planet)?;
        let partner_house = partner_chart.house(planet)?;
        let diff = user_house.abs_diff(partner_house);
        let separation = diff.min(12 - diff);
        let aspect = Aspect::classify(f64::from(separation) * 30.0);
        tracing::trace!(
            "{} houses {} / {} -> {:?}",
            planet.name(),
            user_house,
            partner_house,
            aspect
        );
        aspect
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_with(positions: [f64; 4]) -> BirthChart {
        Planet::TRACKED
            .iter()
            .zip(positions)
            .fold(BirthChart::new("Aries"), |chart, (&planet, pos)| {
                chart.with_planet(planet, pos, None)
            })
    }

    #[test]
    fn test_classify_buckets() {
        assert_eq!(Aspect::classify(0.0), Some(Aspect::Conjunction));
        assert_eq!(Aspect::classify(9.99), Some(Aspect::Conjunction));
        assert_eq!(Aspect::classify(10.0), None);
        assert_eq!(Aspect::classify(55.0), Some(Aspect::Sextile));
        assert_eq!(Aspect::classify(65.0), Some(Aspect::Sextile));
        assert_eq!(Aspect::classify(90.0), Some(Aspect::Square));
        assert_eq!(Aspect::classify(120.0), Some(Aspect::Trine));
        assert_eq!(Aspect::classify(185.0), Some(Aspect::Opposition));
        assert_eq!(Aspect::classify(150.0), None);
    }

    #[test]
    fn test_angular_distance_not_folded() {
        assert_eq!(angular_distance(350.0, 10.0), 340.0);
        assert_eq!(angular_distance(10.0, 370.0), 0.0);
        // 300° apart is not treated as a 60° sextile
        assert_eq!(Aspect::classify(angular_distance(300.0, 0.0)), None);
    }

    #[test]
    fn test_all_conjunctions() {
        let user = chart_with([10.0, 20.0, 30.0, 40.0]);
        let partner = chart_with([10.0, 20.0, 30.0, 40.0]);
        assert_eq!(calculate_aspect_compatibility(&user, &partner), 100.0);
    }

    #[test]
    fn test_square_only() {
        let user = chart_with([0.0, 0.0, 0.0, 0.0]);
        let partner = chart_with([90.0, 150.0, 150.0, 150.0]);
        // Sun squares, the rest fall between buckets
        let score = calculate_aspect_compatibility(&user, &partner);
        assert!((score - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_aspects_average() {
        let user = chart_with([0.0, 0.0, 0.0, 0.0]);
        let partner = chart_with([0.0, 120.0, 60.0, 180.0]);
        // (1.0 + 0.9 + 0.8 + 0.5) / 4
        let score = calculate_aspect_compatibility(&user, &partner);
        assert!((score - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_aspects_is_neutral() {
        let user = chart_with([0.0, 0.0, 0.0, 0.0]);
        let partner = chart_with([30.0, 40.0, 140.0, 150.0]);
        assert_eq!(calculate_aspect_compatibility(&user, &partner), NEUTRAL_ASPECT_SCORE);
    }

    #[test]
    fn test_missing_planets_default_to_zero() {
        let user = BirthChart::new("Leo");
        let partner = BirthChart::new("Virgo");
        // Every planet sits at 0°, so every pair is a conjunction
        assert_eq!(calculate_aspect_compatibility(&user, &partner), 100.0);
    }

    #[test]
    fn test_house_compatibility() {
        let user = BirthChart::new("Aries")
            .with_planet(Planet::Sun, 0.0, Some(1))
            .with_planet(Planet::Moon, 0.0, Some(2))
            .with_planet(Planet::Venus, 0.0, Some(12));
        let partner = BirthChart::new("Leo")
            .with_planet(Planet::Sun, 0.0, Some(1))
            .with_planet(Planet::Moon, 0.0, Some(6))
            .with_planet(Planet::Venus, 0.0, Some(1));

        // Sun: same house (1.0), Moon: 4 apart trine (0.9), Venus: 1 apart unclassified
        let score = calculate_house_compatibility(&user, &partner);
        assert!((score - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_house_wraps_around_wheel() {
        let user = BirthChart::new("Aries").with_planet(Planet::Mars, 0.0, Some(11));
        let partner = BirthChart::new("Aries").with_planet(Planet::Mars, 0.0, Some(2));
        // 11 -> 2 is 3 houses the short way: square
        assert!((calculate_house_compatibility(&user, &partner) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_house_without_data_is_neutral() {
        let user = BirthChart::new("Aries").with_planet(Planet::Sun, 0.0, Some(1));
        let partner = BirthChart::new("Leo");
        assert_eq!(calculate_house_compatibility(&user, &partner), NEUTRAL_ASPECT_SCORE);
    }
}
