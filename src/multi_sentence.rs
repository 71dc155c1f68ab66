//! # Multi-sentence reassembly
//!
//! Some messages (satellites in view, routes) spread their payload over a
//! group of sentences of the same type, each carrying the group size and its
//! own one-based index. The first sentence builds the message; following
//! sentences are absorbed into it as long as they continue the sequence.
//!
//! A broken sequence is never an error. The fragment is refused and the caller
//! starts a fresh message from it instead.

use crate::{Error, Fields, FromFields, Result, Sentence, talker::TalkerId};

/// Positions of the group size and fragment index in a variant's field list.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentLayout {
    /// Field holding the number of sentences in the group
    pub count: usize,
    /// Field holding the one-based index of this sentence
    pub index: usize,
}

impl FragmentLayout {
    /// Group size in the first field, index in the second.
    pub const LEADING: Self = Self { count: 0, index: 1 };

    /// Reads `(count, index)` out of a sentence's fields.
    pub fn read(&self, fields: &[String]) -> Result<(u16, u16)> {
        Ok((read_counter(fields, self.count)?, read_counter(fields, self.index)?))
    }
}

fn read_counter(fields: &[String], position: usize) -> Result<u16> {
    let mut cursor = Fields::new(fields);
    cursor.skip(position);
    u16::from_fields(&mut cursor).map_err(|err| Error::InvalidFragment(err.to_string()))
}

/// Implemented by sentence variants whose payload may span several sentences.
pub trait MultiSentence {
    /// Where this variant keeps its group size and fragment index.
    fn layout(&self) -> FragmentLayout {
        FragmentLayout::LEADING
    }

    /// Absorbs the payload of a following fragment.
    ///
    /// Returns `false`, without modifying `self`, when the fragment content
    /// contradicts what has been accumulated so far.
    fn merge_fragment(&mut self, fragment: &Sentence) -> bool;
}

/// Sequence bookkeeping of one in-flight group.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSentenceState {
    total_count: u16,
    first_index: u16,
    last_index: u16,
    talkers: Vec<TalkerId>,
    layout: FragmentLayout,
}

impl MultiSentenceState {
    /// Starts tracking a group from its first received fragment.
    ///
    /// Fails with [`Error::InvalidFragment`] when the counters are missing,
    /// malformed or out of range. A first fragment with an index other than 1
    /// is accepted, but such a group can never complete.
    pub fn start(sentence: &Sentence, layout: FragmentLayout) -> Result<Self> {
        let (total_count, index) = layout.read(&sentence.fields)?;

        if total_count == 0 || index == 0 || index > total_count {
            return Err(Error::InvalidFragment(format!(
                "fragment {index} of {total_count}"
            )));
        }

        Ok(Self {
            total_count,
            first_index: index,
            last_index: index,
            talkers: vec![TalkerId::from_type_id(&sentence.type_id)],
            layout,
        })
    }

    /// Whether a fragment numbered `index` of a `count`-sentence group continues
    /// this one.
    pub fn accepts(&self, count: u16, index: u16) -> bool {
        !self.is_complete()
            && self.first_index == 1
            && count == self.total_count
            && index <= self.total_count
            && self.last_index.checked_add(1) == Some(index)
    }

    /// Records a fragment that has been absorbed.
    pub fn advance(&mut self, index: u16, talker: TalkerId) {
        self.last_index = index;
        if !self.talkers.contains(&talker) {
            self.talkers.push(talker);
        }
    }

    /// Talker of the group, [`TalkerId::Multiple`] if its fragments came from
    /// different talkers.
    pub fn talker(&self) -> TalkerId {
        match self.talkers.as_slice() {
            [single] => *single,
            _ => TalkerId::Multiple,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.first_index == 1 && self.last_index == self.total_count
    }

    pub fn total_count(&self) -> u16 {
        self.total_count
    }

    pub fn first_index(&self) -> u16 {
        self.first_index
    }

    pub fn last_index(&self) -> u16 {
        self.last_index
    }

    pub fn layout(&self) -> FragmentLayout {
        self.layout
    }
}
