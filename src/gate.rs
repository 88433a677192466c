//! Multi-step confirmation gates.
//!
//! A gate captures a pending target when it opens and only hands it back for
//! application once every prompt has been confirmed, in order. Cancelling at
//! any step hands the target back too, so the caller can restore whatever
//! control triggered the gate. Each feature owns its own gate instance.

/// One step of a confirmation gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: Option<String>,
    pub message: String,
}

impl Prompt {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: None,
            message: message.into(),
        }
    }

    pub fn titled(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            message: message.into(),
        }
    }
}

/// An in-progress gate: the bound target and the prompt currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateSession<T> {
    target: T,
    step: usize,
}

impl<T> GateSession<T> {
    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn step(&self) -> usize {
        self.step
    }
}

/// What the caller should do after driving the gate.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateStep<T> {
    /// Show the prompt at this index and wait for the next answer.
    Prompt(usize),
    /// Every prompt was confirmed: apply the captured target.
    Apply(T),
    /// No session was open; nothing to do.
    Idle,
}

#[derive(Debug, Clone)]
pub struct ConfirmationGate<T> {
    prompts: Vec<Prompt>,
    session: Option<GateSession<T>>,
}

impl<T> ConfirmationGate<T> {
    pub fn new(prompts: Vec<Prompt>) -> Self {
        Self {
            prompts,
            session: None,
        }
    }

    /// Open a session for `target`, replacing any session already open.
    ///
    /// A gate without prompts applies straight away.
    pub fn start(&mut self, target: T) -> GateStep<T> {
        if self.prompts.is_empty() {
            self.session = None;
            return GateStep::Apply(target);
        }
        self.session = Some(GateSession { target, step: 0 });
        GateStep::Prompt(0)
    }

    /// Confirm the prompt currently shown.
    pub fn confirm(&mut self) -> GateStep<T> {
        let Some(mut session) = self.session.take() else {
            return GateStep::Idle;
        };
        session.step += 1;
        if session.step < self.prompts.len() {
            let step = session.step;
            self.session = Some(session);
            GateStep::Prompt(step)
        } else {
            GateStep::Apply(session.target)
        }
    }

    /// Abandon the session, discarding every confirmation given so far.
    /// Returns the captured target so the caller can restore its control.
    pub fn cancel(&mut self) -> Option<T> {
        self.session.take().map(|s| s.target)
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&GateSession<T>> {
        self.session.as_ref()
    }

    pub fn current_prompt(&self) -> Option<&Prompt> {
        self.session.as_ref().and_then(|s| self.prompts.get(s.step))
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    /// Number of confirmations required to apply.
    pub fn required_confirmations(&self) -> usize {
        self.prompts.len()
    }
}

// ---------------------------------------------------------------------------
// Button placement
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateButton {
    Confirm,
    Cancel,
}

impl GateButton {
    pub fn label(self) -> &'static str {
        match self {
            Self::Confirm => "Confirm",
            Self::Cancel => "Cancel",
        }
    }
}

/// Draws above this value put the cancel control on the left.
const SWAP_THRESHOLD: f64 = 0.4;

/// Decide the visual `(left, right)` order of a confirm/cancel pair from a
/// uniform draw in `[0, 1)`. Only positions change; the pair's roles don't.
pub fn order_pair<B>(confirm: B, cancel: B, draw: f64) -> (B, B) {
    if draw > SWAP_THRESHOLD {
        (cancel, confirm)
    } else {
        (confirm, cancel)
    }
}

/// Left-to-right placement of the two gate buttons for one prompt render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonOrder {
    pub left: GateButton,
    pub right: GateButton,
}

impl ButtonOrder {
    pub fn from_draw(draw: f64) -> Self {
        let (left, right) = order_pair(GateButton::Confirm, GateButton::Cancel, draw);
        Self { left, right }
    }

    /// A fresh uniform draw, taken every time a prompt is shown.
    pub fn shuffled() -> Self {
        Self::from_draw(rand::random::<f64>())
    }

    pub fn as_array(self) -> [GateButton; 2] {
        [self.left, self.right]
    }
}

impl Default for ButtonOrder {
    fn default() -> Self {
        Self::from_draw(0.0)
    }
}
