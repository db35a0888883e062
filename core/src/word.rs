use crate::{ItemId, WordId};

/// Unit of typable text tracked by completion progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    text: String,
    total: usize,
    completed: usize,
    claimed_by: Option<ItemId>,
}

impl Word {
    /// Creates an untouched, unclaimed word.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let total = text.chars().count();
        Self {
            text,
            total,
            completed: 0,
            claimed_by: None,
        }
    }

    /// Full text of the word.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters required to complete the word.
    #[must_use]
    pub const fn total_chars(&self) -> usize {
        self.total
    }

    /// Number of characters typed so far.
    #[must_use]
    pub const fn completed_chars(&self) -> usize {
        self.completed
    }

    /// Reports whether every character has been typed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.completed == self.total
    }

    /// Types one more character.
    ///
    /// Returns `false` without changing anything when the word is already
    /// complete; a caller hitting that case is holding a stale claim.
    pub fn advance(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.completed += 1;
        true
    }

    /// Character the typist must produce next, if any remain.
    #[must_use]
    pub fn next_char(&self) -> Option<char> {
        self.text.chars().nth(self.completed)
    }

    /// Portion of the text that has not been typed yet.
    #[must_use]
    pub fn remaining_text(&self) -> &str {
        match self.text.char_indices().nth(self.completed) {
            Some((offset, _)) => &self.text[offset..],
            None => "",
        }
    }

    /// Completion expressed as a whole percentage.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let percent = self.completed * 100 / self.total;
        u8::try_from(percent).unwrap_or(100)
    }

    /// Item holding the claim marker, or the item that finished the word.
    #[must_use]
    pub const fn claimed_by(&self) -> Option<ItemId> {
        self.claimed_by
    }

    /// Overwrites the claim marker.
    pub fn set_claimed_by(&mut self, item: Option<ItemId>) {
        self.claimed_by = item;
    }

    /// Zeroes the typed progress, leaving the claim marker untouched.
    pub fn restart(&mut self) {
        self.completed = 0;
    }
}

/// Ordered collection of the words in play, plus the human's active word.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordPool {
    words: Vec<Word>,
    active: Option<WordId>,
}

impl WordPool {
    /// Builds a pool from the provided texts, skipping empty entries.
    #[must_use]
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = texts
            .into_iter()
            .map(Word::new)
            .filter(|word| word.total_chars() > 0)
            .collect();
        Self {
            words,
            active: None,
        }
    }

    /// Words in insertion order.
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Mutable access to every word, used when recycling a round.
    pub fn words_mut(&mut self) -> &mut [Word] {
        &mut self.words
    }

    /// Number of words in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Reports whether the pool holds no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterator over the identifiers of every word, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = WordId> {
        (0..self.words.len()).filter_map(|index| u32::try_from(index).ok().map(WordId::new))
    }

    /// Looks up a word by identifier.
    #[must_use]
    pub fn word(&self, id: WordId) -> Option<&Word> {
        self.words.get(id.index())
    }

    /// Looks up a word by identifier for mutation.
    pub fn word_mut(&mut self, id: WordId) -> Option<&mut Word> {
        self.words.get_mut(id.index())
    }

    /// Word the human is currently typing.
    #[must_use]
    pub const fn active(&self) -> Option<WordId> {
        self.active
    }

    /// Replaces the human's active word.
    pub fn set_active(&mut self, word: Option<WordId>) {
        self.active = word;
    }

    /// Reports whether the pool is populated and every word is complete.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        !self.words.is_empty() && self.words.iter().all(Word::is_complete)
    }

    /// Words an idle item may claim: not active, not complete, unclaimed.
    #[must_use]
    pub fn eligible_for_claim(&self) -> Vec<WordId> {
        self.ids()
            .filter(|id| Some(*id) != self.active)
            .filter(|id| {
                self.word(*id)
                    .map_or(false, |word| !word.is_complete() && word.claimed_by().is_none())
            })
            .collect()
    }

    /// Claims `word` for `item` if nobody holds it yet.
    ///
    /// The check and the write happen in one step; this is the only place a
    /// claim marker moves from unclaimed to claimed.
    pub fn try_claim(&mut self, word: WordId, item: ItemId) -> bool {
        if Some(word) == self.active {
            return false;
        }
        match self.words.get_mut(word.index()) {
            Some(entry) if !entry.is_complete() && entry.claimed_by().is_none() => {
                entry.set_claimed_by(Some(item));
                true
            }
            _ => false,
        }
    }

    /// First incomplete word in pool order that no item is typing, skipping `excluding`.
    ///
    /// `held` lists the words owned items currently hold. A leftover claim
    /// marker on a word nobody holds does not keep the human away from it.
    #[must_use]
    pub fn first_available(&self, excluding: Option<WordId>, held: &[WordId]) -> Option<WordId> {
        self.ids()
            .filter(|id| Some(*id) != excluding && !held.contains(id))
            .find(|id| self.word(*id).map_or(false, |word| !word.is_complete()))
    }
}
