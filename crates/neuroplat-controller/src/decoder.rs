use neuroplat_engine::Actions;

/// Number of network outputs the decoder reads.
pub const OUTPUT_SIZE: usize = 4;

/// Turns the four network outputs into control input.
///
/// | output | meaning when `> 0` |
/// |---|---|
/// | 0 | move left |
/// | 1 | move right |
/// | 2 | jump |
/// | 3 | suppress: all three actions are forced off |
///
/// The first three are independent, so left and right may both be pressed. The
/// suppression output overrides them unconditionally, which can cancel
/// otherwise valid movement.
#[derive(Debug, Default, Clone, Copy)]
pub struct ActionDecoder;

impl ActionDecoder {
    /// # Panics
    ///
    /// Panics if `outputs.len() != OUTPUT_SIZE`.
    #[must_use]
    pub fn decode(outputs: &[f32]) -> Actions {
        if Self::is_suppressed(outputs) {
            return Actions::IDLE;
        }
        Actions {
            left: outputs[0] > 0.0,
            right: outputs[1] > 0.0,
            jump: outputs[2] > 0.0,
        }
    }

    /// Returns whether the suppression output is active.
    ///
    /// # Panics
    ///
    /// Panics if `outputs.len() != OUTPUT_SIZE`.
    #[must_use]
    pub fn is_suppressed(outputs: &[f32]) -> bool {
        assert_eq!(outputs.len(), OUTPUT_SIZE, "decoder expects {OUTPUT_SIZE} outputs");
        outputs[3] > 0.0
    }
}
