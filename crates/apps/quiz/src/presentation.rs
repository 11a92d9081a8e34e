use scene::selection::{Feedback, FeedbackClass};

/// The guess panel: a text input plus one feedback line.
pub trait GuessPanel {
    fn show(&mut self);
    fn hide(&mut self);
    fn clear_input(&mut self);
    fn focus_input(&mut self);
    fn set_feedback(&mut self, message: &str, class: FeedbackClass);
}

/// Panel that only records what it was told. Used by tests and the CLI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessPanel {
    pub visible: bool,
    pub input_clears: u32,
    pub focus_requests: u32,
    pub feedback: Option<(String, FeedbackClass)>,
}

impl HeadlessPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feedback_message(&self) -> Option<&str> {
        self.feedback.as_ref().map(|(m, _)| m.as_str())
    }

    pub fn shows(&self, feedback: Feedback) -> bool {
        self.feedback_message() == Some(feedback.message())
    }
}

impl GuessPanel for HeadlessPanel {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn clear_input(&mut self) {
        self.input_clears += 1;
    }

    fn focus_input(&mut self) {
        self.focus_requests += 1;
    }

    fn set_feedback(&mut self, message: &str, class: FeedbackClass) {
        self.feedback = Some((message.to_string(), class));
    }
}
