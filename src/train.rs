//! The One-Step Training Nudge
//!
//! A real training loop computes the gradient of a loss with respect to every
//! parameter and steps against it. This module does something much smaller:
//! one input word, one target word, and a single hand-written push on each
//! parameter matrix toward the target.
//!
//! ## The Update Rule
//!
//! If the model already predicts the target, nothing changes. Otherwise, in
//! this order:
//!
//! ```text
//! 1. output[:, target] += lr × hidden
//!        make the target's column look more like the hidden features
//! 2. hidden_weights    += lr × outer(vector, output[:, target] > 0)
//!        push every input feature into the hidden units the target likes
//! 3. embedding[input]  += lr × (hidden_weights @ output[:, target])
//!        move the input word toward what the target column responds to
//! ```
//!
//! Steps 2 and 3 read the parameters as already updated by the earlier steps.
//!
//! ## This Is Not Backpropagation
//!
//! No loss function is defined, and these increments are not the gradient of
//! any loss. Step 1 resembles the output-layer gradient of a linear score, but
//! steps 2 and 3 ignore the ReLU of the current input and the other words'
//! columns entirely. The rule is kept exactly as written because it shows the
//! *shape* of learning (every layer moves a little toward the answer), not
//! because it is a correct optimizer. A single nudge may or may not flip the
//! prediction.

use crate::error::{Error, Result};
use crate::layers::positive_mask;
use crate::model::{NextWordModel, Prediction};
use crate::tensor::Tensor;
use tracing::{debug, info};

/// What one call to [`nudge`] saw and did
#[derive(Clone, Debug)]
pub struct StepReport {
    /// Forward pass before any update
    pub before: Prediction,
    /// Forward pass after the update (equal to `before` when nothing changed)
    pub after: Prediction,
    /// The word the model was pushed toward
    pub target_id: usize,
    /// Whether the parameters were changed
    pub updated: bool,
}

/// Apply one illustrative update toward `target_id`
///
/// # Arguments
///
/// * `model` - Parameters, updated in place
/// * `input_id` - The word the model sees
/// * `target_id` - The word that should come next
/// * `learning_rate` - Size of the push
///
/// # Errors
///
/// Returns [`Error::TokenOutOfRange`] if either id is outside the vocabulary.
/// The model is left untouched in that case.
pub fn nudge(
    model: &mut NextWordModel,
    input_id: usize,
    target_id: usize,
    learning_rate: f32,
) -> Result<StepReport> {
    if target_id >= model.vocab_size() {
        return Err(Error::token_out_of_range(target_id, model.vocab_size()));
    }
    let before = model.forward(input_id)?;

    if before.predicted_id == target_id {
        debug!(input_id, target_id, "prediction already correct, no update");
        return Ok(StepReport {
            after: before.clone(),
            before,
            target_id,
            updated: false,
        });
    }

    // 1. Output column of the target moves toward the hidden features
    let vocab_size = model.vocab_size();
    for (h, &activation) in before.hidden.data.iter().enumerate() {
        model.output.weight.data[h * vocab_size + target_id] += learning_rate * activation;
    }
    let target_column = model.output.weight.column(target_id);

    // 2. Hidden weights: input features × units the target column rewards
    let push = Tensor::outer(&before.vector, &positive_mask(&target_column));
    model.hidden.weight = model.hidden.weight.add(&push.mul_scalar(learning_rate));

    // 3. Input embedding follows the (updated) hidden weights
    let delta = model.hidden.weight.matvec(&target_column);
    let row = model.embeddings.row_mut(input_id)?;
    for (value, d) in row.iter_mut().zip(&delta.data) {
        *value += learning_rate * d;
    }

    let after = model.forward(input_id)?;
    info!(
        input_id,
        target_id,
        before = before.predicted_id,
        after = after.predicted_id,
        learning_rate,
        "nudged embeddings, hidden layer, and output weights"
    );

    Ok(StepReport {
        before,
        after,
        target_id,
        updated: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Config;
    use crate::vocab::Vocabulary;

    fn hand_model() -> NextWordModel {
        NextWordModel::from_parts(
            Tensor::from_rows(&[[1.0, 0.0], [0.0, 1.0]]),
            Tensor::eye(2),
            Tensor::from_rows(&[[0.0, 1.0], [0.0, -1.0]]),
        )
    }

    #[test]
    fn test_update_rule_by_hand() {
        let mut model = hand_model();
        let report = nudge(&mut model, 0, 0, 0.5).unwrap();

        assert!(report.updated);
        assert_eq!(report.before.predicted_id, 1);
        assert_eq!(report.before.hidden.data, vec![1.0, 0.0]);

        // 1. output[:, 0] += 0.5 × [1, 0]
        assert_eq!(model.output.weight.data, vec![0.5, 1.0, 0.0, -1.0]);
        // 2. hidden += 0.5 × outer([1, 0], [1, 0])
        assert_eq!(model.hidden.weight.data, vec![1.5, 0.0, 0.0, 1.0]);
        // 3. embedding[0] += 0.5 × ([[1.5, 0], [0, 1]] @ [0.5, 0])
        assert_eq!(model.embeddings.weight.row_slice(0), &[1.375, 0.0]);
        // Other words are untouched
        assert_eq!(model.embeddings.weight.row_slice(1), &[0.0, 1.0]);

        assert_eq!(report.after.logits.data, vec![1.03125, 2.0625]);
        assert_eq!(report.after.predicted_id, 1);
    }

    #[test]
    fn test_no_update_when_already_correct() {
        let mut model = hand_model();
        let original = model.clone();
        let report = nudge(&mut model, 0, 1, 0.5).unwrap();

        assert!(!report.updated);
        assert_eq!(report.after.predicted_id, 1);
        assert_eq!(model.output.weight, original.output.weight);
        assert_eq!(model.hidden.weight, original.hidden.weight);
        assert_eq!(model.embeddings.weight, original.embeddings.weight);
    }

    #[test]
    fn test_out_of_range_ids_leave_model_alone() {
        let mut model = hand_model();
        let original = model.clone();
        assert_eq!(
            nudge(&mut model, 0, 2, 0.5).unwrap_err(),
            Error::token_out_of_range(2, 2)
        );
        assert!(nudge(&mut model, 5, 0, 0.5).is_err());
        assert_eq!(model.output.weight, original.output.weight);
        assert_eq!(model.embeddings.weight, original.embeddings.weight);
    }

    #[test]
    fn test_the_predicts_cat_scenario() {
        let vocab = Vocabulary::from_corpus("the cat sat on the mat. the cat ate. the dog sat.");
        assert_eq!(
            vocab.words(),
            &["ate", "cat", "dog", "mat", "on", "sat", "the"]
        );

        let config = Config::next_word(vocab.len());
        assert_eq!((config.vector_size, config.hidden_size), (4, 8));

        let the = vocab.id("the").unwrap();
        let cat = vocab.id("cat").unwrap();

        // Every seed must behave, whichever way the first guess goes
        for seed in 0..20 {
            let mut model = NextWordModel::new(&config.clone().with_seed(seed));
            let first = model.forward(the).unwrap();
            assert!(first.predicted_id < vocab.len());

            let report = nudge(&mut model, the, cat, config.learning_rate).unwrap();
            assert_eq!(report.updated, first.predicted_id != cat);

            let second = model.forward(the).unwrap();
            assert!(second.predicted_id < vocab.len());
            assert!(second.logits.data.iter().all(|x| x.is_finite()));
            assert_eq!(second.predicted_id, report.after.predicted_id);
        }
    }
}
