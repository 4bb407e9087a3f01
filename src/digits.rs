//! Digit Recognition by Template Matching
//!
//! Before any learning, a "model" can be nothing more than a stack of
//! hand-drawn pictures. Each 16x16 picture is flattened into a 256-long row;
//! stacking the rows gives a weight matrix, and recognizing an image is one
//! matrix-vector product followed by picking the biggest score.
//!
//! ```text
//! templates [n_digits, 256] @ image [256] → scores [n_digits] → argmax
//! ```
//!
//! A score is the dot product of a template with the image: every pixel
//! where both are bright adds to it, so the template that overlaps the image
//! most wins.

use crate::tensor::Tensor;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

/// Side length of a digit image
pub const SIDE: usize = 16;
/// Number of pixels in a flattened digit image
pub const PIXELS: usize = SIDE * SIDE;

fn set(grid: &mut [f32], row: usize, col: usize) {
    grid[row * SIDE + col] = 1.0;
}

/// Hand-drawn 16x16 template for `digit`, flattened to `[256]`
///
/// - **0**: a square outline, rows and columns 4 through 11
/// - **1**: a vertical stroke down column 8, rows 4 through 11
///
/// Other digits have no drawing and come back blank.
pub fn digit_template(digit: usize) -> Tensor {
    let mut grid = vec![0.0; PIXELS];
    match digit {
        0 => {
            for i in 4..12 {
                set(&mut grid, i, 4);
                set(&mut grid, i, 11);
                set(&mut grid, 4, i);
                set(&mut grid, 11, i);
            }
        }
        1 => {
            for row in 4..12 {
                set(&mut grid, row, 8);
            }
        }
        _ => {}
    }
    Tensor::vector(grid)
}

/// Template image with independent noise added to every pixel
///
/// ```rust
/// # use rand::SeedableRng;
/// # use rand_distr::Normal;
/// let noise = Normal::new(0.0, 0.1).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let image = abacus::digits::noisy_digit(1, &noise, &mut rng);
/// assert_eq!(image.shape, vec![256]);
/// ```
pub fn noisy_digit(digit: usize, noise: &Normal<f32>, rng: &mut StdRng) -> Tensor {
    let mut image = digit_template(digit);
    for pixel in image.data.iter_mut() {
        *pixel += noise.sample(rng);
    }
    image
}

/// A stack of templates, one row per digit
#[derive(Clone, Debug)]
pub struct TemplateBank {
    /// Templates: [n_digits, 256]
    pub templates: Tensor,
    /// Which digit each row draws
    pub digits: Vec<usize>,
}

impl TemplateBank {
    /// Stack the templates for `digits` in the given order
    ///
    /// # Panics
    ///
    /// Panics if `digits` is empty.
    pub fn new(digits: &[usize]) -> Self {
        assert!(!digits.is_empty(), "Template bank needs at least one digit");
        let mut data = Vec::with_capacity(digits.len() * PIXELS);
        for &digit in digits {
            data.extend(digit_template(digit).data);
        }
        Self {
            templates: Tensor::new(data, vec![digits.len(), PIXELS]),
            digits: digits.to_vec(),
        }
    }

    /// One score per template: `templates @ image`
    pub fn scores(&self, image: &Tensor) -> Tensor {
        self.templates.matvec(image)
    }

    /// The digit whose template scores highest
    pub fn recognize(&self, image: &Tensor) -> usize {
        self.digits[self.scores(image).argmax()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_templates_draw_expected_pixels() {
        let zero = digit_template(0);
        let one = digit_template(1);
        assert_eq!(zero.shape, vec![PIXELS]);

        // Outline of 8x8 square: 4 sides of 8, corners shared
        assert_eq!(zero.data.iter().sum::<f32>(), 28.0);
        assert_eq!(one.data.iter().sum::<f32>(), 8.0);
        assert_eq!(one.data[4 * SIDE + 8], 1.0);
        assert_eq!(one.data[12 * SIDE + 8], 0.0);
        assert_eq!(zero.data[4 * SIDE + 4], 1.0);
        assert_eq!(zero.data[7 * SIDE + 7], 0.0);

        assert!(digit_template(7).data.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_clean_images_match_their_template() {
        let bank = TemplateBank::new(&[0, 1]);
        assert_eq!(bank.templates.shape, vec![2, PIXELS]);

        // "1" overlaps the zero outline only where the stroke crosses rows 4 and 11
        let scores = bank.scores(&digit_template(1));
        assert_eq!(scores.data, vec![2.0, 8.0]);
        assert_eq!(bank.recognize(&digit_template(1)), 1);
        assert_eq!(bank.recognize(&digit_template(0)), 0);
    }

    #[test]
    fn test_noisy_one_is_recognized() {
        let bank = TemplateBank::new(&[0, 1]);
        let noise = Normal::new(0.0, 0.1).unwrap();
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let image = noisy_digit(1, &noise, &mut rng);
            assert_eq!(bank.recognize(&image), 1, "seed {}", seed);
        }
    }

    #[test]
    fn test_bank_order_maps_back_to_digits() {
        let bank = TemplateBank::new(&[1, 0]);
        assert_eq!(bank.recognize(&digit_template(0)), 0);
        assert_eq!(bank.recognize(&digit_template(1)), 1);
    }
}
