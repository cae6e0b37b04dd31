//! Star field generation
//!
//! Builds the static per-point buffers (positions, base sizes, colors,
//! categories) once, and owns the size buffer the oscillator mutates.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

use super::config::{AppearanceConfig, GeneratorConfig};
use super::oscillator::{SizeBuffer, SizeOscillator};
use super::sampling::{rotate_to_view, sample_polar, spherical_to_cartesian, Sector};

/// Highlighted user data or background data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StarKind {
    Background,
    User,
}

/// One generated star with its source attributes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarPoint {
    pub category: u32,
    /// Legacy attribute in [1, 5), not used for placement
    pub depth: f64,
    /// Legacy attribute in [0, 100), not used for placement
    pub similarity: f64,
    pub kind: StarKind,
    /// Azimuth before the view rotation, [0, 2π)
    pub phi: f64,
    /// Polar angle, [0, π]
    pub theta: f64,
    pub position: Vec3,
}

impl StarPoint {
    pub fn is_user(&self) -> bool {
        self.kind == StarKind::User
    }
}

/// Generated set of stars as parallel GPU-ready arrays
#[derive(Debug, Clone)]
pub struct StarField {
    seed: u64,
    category_count: u32,
    user_count: usize,
    points: Vec<StarPoint>,
    positions: Vec<f32>,
    base_sizes: Vec<f32>,
    colors: Vec<f32>,
    categories: Vec<u32>,
    sizes: SizeBuffer,
}

/// JSON dump of a generated field
#[derive(Debug, Serialize)]
pub struct FieldExport<'a> {
    pub seed: u64,
    pub count: usize,
    pub category_count: u32,
    pub positions: &'a [f32],
    pub base_sizes: &'a [f32],
    pub colors: &'a [f32],
    pub categories: &'a [u32],
    pub kinds: Vec<StarKind>,
}

impl StarField {
    /// Generate a field. A missing seed is drawn from the OS entropy source
    /// and recorded, so the field can be reproduced later.
    pub fn generate(generator: &GeneratorConfig, appearance: &AppearanceConfig) -> Self {
        let seed = generator.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate_with_rng(generator, appearance, seed, &mut rng)
    }

    /// Generate from an explicit random source; `seed` is recorded as-is.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        generator: &GeneratorConfig,
        appearance: &AppearanceConfig,
        seed: u64,
        rng: &mut R,
    ) -> Self {
        assert!(generator.category_count > 0, "category_count must be positive");

        let total = generator.background_count + generator.user_count;
        let mut points = Vec::with_capacity(total);

        // Background first, users last
        let kinds = std::iter::repeat(StarKind::Background)
            .take(generator.background_count)
            .chain(std::iter::repeat(StarKind::User).take(generator.user_count));

        for kind in kinds {
            points.push(sample_point(rng, generator, kind));
        }

        let mut field = Self {
            seed,
            category_count: generator.category_count,
            user_count: generator.user_count,
            positions: Vec::with_capacity(total * 3),
            base_sizes: Vec::with_capacity(total),
            colors: Vec::with_capacity(total * 3),
            categories: Vec::with_capacity(total),
            sizes: SizeBuffer::default(),
            points: Vec::new(),
        };

        for p in &points {
            let (size, color) = match p.kind {
                StarKind::User => (appearance.user_size, appearance.user_color),
                StarKind::Background => (appearance.background_size, appearance.background_color),
            };
            field.positions.extend_from_slice(&p.position.to_array());
            field.base_sizes.push(size);
            field.colors.extend_from_slice(&color);
            field.categories.push(p.category);
        }
        field.sizes = SizeBuffer::from_base(&field.base_sizes);
        field.points = points;

        debug!(
            seed,
            background = generator.background_count,
            users = generator.user_count,
            categories = generator.category_count,
            histogram = ?field.category_histogram(),
            "Star field generated"
        );

        field
    }

    /// Recompute every current size for time `elapsed` and flag the buffer.
    pub fn tick(&mut self, oscillator: &SizeOscillator, elapsed: f64) {
        oscillator.apply(elapsed, &self.base_sizes, self.sizes.as_mut_slice());
        self.sizes.mark_dirty();
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn user_count(&self) -> usize {
        self.user_count
    }

    pub fn background_count(&self) -> usize {
        self.points.len() - self.user_count
    }

    pub fn category_count(&self) -> u32 {
        self.category_count
    }

    pub fn points(&self) -> &[StarPoint] {
        &self.points
    }

    /// xyz triples
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn base_sizes(&self) -> &[f32] {
        &self.base_sizes
    }

    /// rgb triples
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn categories(&self) -> &[u32] {
        &self.categories
    }

    pub fn sizes(&self) -> &SizeBuffer {
        &self.sizes
    }

    pub fn sizes_mut(&mut self) -> &mut SizeBuffer {
        &mut self.sizes
    }

    /// Number of stars per category
    pub fn category_histogram(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.category_count as usize];
        for &c in &self.categories {
            counts[c as usize] += 1;
        }
        counts
    }

    pub fn export(&self) -> FieldExport<'_> {
        FieldExport {
            seed: self.seed,
            count: self.len(),
            category_count: self.category_count,
            positions: &self.positions,
            base_sizes: &self.base_sizes,
            colors: &self.colors,
            categories: &self.categories,
            kinds: self.points.iter().map(|p| p.kind).collect(),
        }
    }
}

fn sample_point<R: Rng + ?Sized>(rng: &mut R, generator: &GeneratorConfig, kind: StarKind) -> StarPoint {
    let depth = rng.gen_range(1.0..5.0);
    let similarity = rng.gen_range(0.0..100.0);
    let category = rng.gen_range(0..generator.category_count);

    let sector = Sector::for_category(category, generator.category_count, generator.overlap);
    let phi = sector.sample(rng, generator.wrap_strategy);
    let theta = sample_polar(rng);
    let position = rotate_to_view(spherical_to_cartesian(phi, theta, 1.0));

    StarPoint {
        category,
        depth,
        similarity,
        kind,
        phi,
        theta,
        position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sampling::WrapStrategy;
    use std::f64::consts::{PI, TAU};

    fn config(background: usize, users: usize, seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            background_count: background,
            user_count: users,
            seed: Some(seed),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn default_counts_give_expected_lengths() {
        let field = StarField::generate(&config(1000, 5, 1), &AppearanceConfig::default());
        assert_eq!(field.len(), 1005);
        assert_eq!(field.positions().len(), 3015);
        assert_eq!(field.base_sizes().len(), 1005);
        assert_eq!(field.sizes().len(), 1005);
        assert_eq!(field.colors().len(), 3015);
        assert_eq!(field.categories().len(), 1005);
        assert_eq!(field.background_count(), 1000);
        assert_eq!(field.user_count(), 5);
    }

    #[test]
    fn empty_inputs_give_empty_arrays() {
        let field = StarField::generate(&config(0, 0, 1), &AppearanceConfig::default());
        assert!(field.is_empty());
        assert!(field.positions().is_empty());
        assert!(field.colors().is_empty());
        assert!(field.sizes().is_empty());
        assert_eq!(field.category_histogram(), vec![0; 10]);
    }

    #[test]
    fn positions_lie_on_unit_sphere() {
        let field = StarField::generate(&config(1000, 5, 2), &AppearanceConfig::default());
        for xyz in field.positions().chunks_exact(3) {
            let len = Vec3::from_slice(xyz).length();
            assert!((len - 1.0).abs() < 1e-5, "|p| = {len}");
        }
    }

    #[test]
    fn angles_within_ranges() {
        let field = StarField::generate(&config(1000, 5, 3), &AppearanceConfig::default());
        for p in field.points() {
            assert!((0.0..=PI).contains(&p.theta), "theta {}", p.theta);
            assert!((0.0..TAU).contains(&p.phi), "phi {}", p.phi);
            assert!((1.0..5.0).contains(&p.depth));
            assert!((0.0..100.0).contains(&p.similarity));
            assert!(p.category < 10);
        }
    }

    #[test]
    fn azimuth_falls_in_category_sector() {
        for strategy in WrapStrategy::ALL {
            for overlap in [0.0, 0.05, 0.3] {
                let generator = GeneratorConfig {
                    overlap,
                    wrap_strategy: *strategy,
                    ..config(2000, 0, 4)
                };
                let field = StarField::generate(&generator, &AppearanceConfig::default());
                let width = TAU / 10.0;
                let epsilon = overlap * width;
                for p in field.points() {
                    let lo = p.category as f64 * width - epsilon;
                    let hi = (p.category + 1) as f64 * width + epsilon;
                    let offset = (p.phi - lo).rem_euclid(TAU);
                    assert!(
                        offset <= hi - lo + 1e-9,
                        "{strategy} overlap {overlap}: phi {} outside category {}",
                        p.phi,
                        p.category
                    );
                }
            }
        }
    }

    #[test]
    fn position_matches_rotated_spherical_coordinates() {
        let field = StarField::generate(&config(50, 5, 5), &AppearanceConfig::default());
        for p in field.points() {
            let x = p.theta.sin() * p.phi.cos();
            let y = p.theta.sin() * p.phi.sin();
            let z = p.theta.cos();
            let expected = Vec3::new(x as f32, z as f32, -y as f32);
            assert!((p.position - expected).length() < 1e-6);
        }
    }

    #[test]
    fn base_sizes_and_colors_by_kind() {
        let appearance = AppearanceConfig::default();
        let field = StarField::generate(&config(1000, 5, 6), &appearance);
        for (i, p) in field.points().iter().enumerate() {
            let color = &field.colors()[i * 3..i * 3 + 3];
            if p.is_user() {
                assert_eq!(field.base_sizes()[i], 0.1);
                assert_eq!(color, &[0.3, 0.5, 1.0]);
            } else {
                assert_eq!(field.base_sizes()[i], 0.03);
                assert_eq!(color, &[1.0, 1.0, 1.0]);
            }
        }
        // Users are the last five points
        assert!(field.points()[..1000].iter().all(|p| !p.is_user()));
        assert!(field.points()[1000..].iter().all(StarPoint::is_user));
    }

    #[test]
    fn same_seed_same_field() {
        let a = StarField::generate(&config(300, 5, 77), &AppearanceConfig::default());
        let b = StarField::generate(&config(300, 5, 77), &AppearanceConfig::default());
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.categories(), b.categories());
        assert_eq!(a.seed(), 77);

        let c = StarField::generate(&config(300, 5, 78), &AppearanceConfig::default());
        assert_ne!(a.positions(), c.positions());
    }

    #[test]
    fn unseeded_generation_records_its_seed() {
        let generator = GeneratorConfig {
            seed: None,
            ..config(100, 5, 0)
        };
        let a = StarField::generate(&generator, &AppearanceConfig::default());
        let replay = StarField::generate(&config(100, 5, a.seed()), &AppearanceConfig::default());
        assert_eq!(a.positions(), replay.positions());
    }

    #[test]
    fn all_categories_get_used() {
        let field = StarField::generate(&config(1000, 0, 8), &AppearanceConfig::default());
        let histogram = field.category_histogram();
        assert_eq!(histogram.iter().sum::<usize>(), 1000);
        assert!(histogram.iter().all(|&n| n > 50), "{histogram:?}");
    }

    #[test]
    fn tick_updates_sizes_and_flags_dirty() {
        let mut field = StarField::generate(&config(10, 2, 9), &AppearanceConfig::default());
        assert!(field.sizes_mut().take_dirty());
        assert_eq!(field.sizes().as_slice(), field.base_sizes());

        let osc = SizeOscillator::default();
        field.tick(&osc, 0.0);
        assert!(field.sizes().is_dirty());
        assert_eq!(field.sizes().as_slice()[0], field.base_sizes()[0]);

        field.tick(&osc, 1.5);
        for (i, (&s, &b)) in field.sizes().as_slice().iter().zip(field.base_sizes()).enumerate() {
            let expected = b + 0.02 * ((1.5 + i as f64).sin() as f32);
            assert!((s - expected).abs() < 1e-7);
        }
        // Static buffers untouched by ticking
        let before = field.positions().to_vec();
        field.tick(&osc, 2.0);
        assert_eq!(field.positions(), &before[..]);
    }

    #[test]
    fn export_serializes() {
        let field = StarField::generate(&config(3, 1, 10), &AppearanceConfig::default());
        let json = serde_json::to_value(field.export()).unwrap();
        assert_eq!(json["seed"], 10);
        assert_eq!(json["count"], 4);
        assert_eq!(json["positions"].as_array().unwrap().len(), 12);
        assert_eq!(json["kinds"][3], "user");
    }
}
