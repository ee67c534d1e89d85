use super::Quiz;

/// The option picked for each question, one slot per question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    slots: Vec<Option<String>>,
}

impl AnswerSet {
    pub fn new(num_questions: usize) -> Self {
        Self {
            slots: vec![None; num_questions],
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|slot| slot.as_deref())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn answered(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
        self.slots.iter().map(|slot| slot.as_deref())
    }

    /// Fills an empty slot. Returns false if the slot is out of range or
    /// already holds an answer.
    pub(crate) fn record(&mut self, index: usize, option: String) -> bool {
        match self.slots.get_mut(index) {
            Some(slot @ None) => {
                *slot = Some(option);
                true
            }
            _ => false,
        }
    }
}

/// Final tally handed to the scorecard once every question is answered.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: usize,
    pub total: usize,
    pub quiz: Quiz,
    pub answers: AnswerSet,
}

impl ScoreResult {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.score as f64 / self.total as f64
        }
    }

    pub fn percentage(&self) -> f64 {
        self.ratio() * 100.0
    }
}
