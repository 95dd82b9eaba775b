//! The record assembly state machine shared by every report grammar.

use std::ops::AddAssign;

use serde::Serialize;

use super::{
    Error, Line, LineCursor, MalformedSectionPolicy, ReportKind,
    classify::{Classifier, Role},
};

/// What a classified line does to the record structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Sets context for the records that follow, such as the cost centre of
    /// the offering report. Closes any open record.
    Context,
    /// Opens a top-level record, closing any open one.
    NewRecord,
    /// Opens a sub-record of the current record, closing any open one.
    NewSubRecord,
    /// Carries nothing, such as a repeated table title.
    Ignore,
}

/// Counts gathered while assembling a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Top-level record markers encountered.
    pub records: usize,
    /// Sub-records assembled.
    pub sub_records: usize,
    /// Sub-records dropped because their fields could not be extracted.
    pub skipped_sub_records: usize,
    /// Lines that did not contribute to any record.
    pub ignored_lines: usize,
}

impl AddAssign for Summary {
    fn add_assign(&mut self, rhs: Self) {
        self.records += rhs.records;
        self.sub_records += rhs.sub_records;
        self.skipped_sub_records += rhs.skipped_sub_records;
        self.ignored_lines += rhs.ignored_lines;
    }
}

/// The records of a parsed report, with the counts of the parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Parsed<T> {
    /// The assembled records.
    pub records: T,
    /// Counts of the parse.
    pub summary: Summary,
}

/// The report-specific half of record assembly.
///
/// A grammar names the roles its lines can play, says what each role does to
/// the record structure, and builds records from the lines it is handed. The
/// [`assemble`] driver decides which hook to call when.
///
/// Hooks that open a record or sub-record receive the cursor positioned just
/// after the marker line, and may consume the fixed follow-on lines the
/// layout prescribes.
pub trait Grammar {
    /// The roles of classified lines.
    type Role: Role;
    /// A top-level record under construction.
    type Record;
    /// A sub-record under construction.
    type SubRecord;
    /// The assembled output.
    type Output: Default;

    /// The report kind, for diagnostics.
    const KIND: ReportKind;

    /// The line classifier.
    fn classifier(&self) -> &Classifier<Self::Role>;

    /// What a line of the given role does to the record structure.
    fn transition(&self, role: Self::Role) -> Transition;

    /// Handles a context line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line or its follow-on lines are malformed.
    fn enter_context(
        &mut self,
        role: Self::Role,
        line: &Line<'_>,
        cursor: &mut LineCursor<'_, '_>,
    ) -> Result<(), Error> {
        let _ = (role, cursor);
        Err(Error::malformed(
            Self::KIND,
            line.index,
            "context line in a report without context",
        ))
    }

    /// Starts a top-level record.
    ///
    /// # Errors
    ///
    /// Returns an error if the line or its follow-on lines are malformed.
    fn open_record(
        &mut self,
        role: Self::Role,
        line: &Line<'_>,
        cursor: &mut LineCursor<'_, '_>,
    ) -> Result<Self::Record, Error>;

    /// Folds a continuation line into a record that has no open sub-record.
    ///
    /// Returns whether the line contributed to the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is malformed.
    fn extend_record(&mut self, record: &mut Self::Record, line: &Line<'_>) -> Result<bool, Error> {
        let _ = (record, line);
        Ok(false)
    }

    /// Starts a sub-record of the current record.
    ///
    /// # Errors
    ///
    /// Returns an error if the line or its follow-on lines are malformed.
    fn open_sub_record(
        &mut self,
        record: &mut Self::Record,
        role: Self::Role,
        line: &Line<'_>,
        cursor: &mut LineCursor<'_, '_>,
    ) -> Result<Self::SubRecord, Error> {
        let _ = (record, role, cursor);
        Err(Error::malformed(
            Self::KIND,
            line.index,
            "sub-record in a report without sub-records",
        ))
    }

    /// Folds a continuation line into the open sub-record.
    ///
    /// Returns whether the line contributed to the sub-record.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is malformed.
    fn extend_sub_record(
        &mut self,
        sub_record: &mut Self::SubRecord,
        line: &Line<'_>,
    ) -> Result<bool, Error> {
        let _ = (sub_record, line);
        Ok(false)
    }

    /// Attaches a finished sub-record to its record.
    fn seal_sub_record(&mut self, record: &mut Self::Record, sub_record: Self::SubRecord) {
        let _ = (record, sub_record);
    }

    /// Adds a finished record to the output, merging with an earlier record
    /// under the same key.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is incomplete.
    fn seal_record(&mut self, output: &mut Self::Output, record: Self::Record) -> Result<(), Error>;
}

enum State<R, S> {
    SeekingRecord,
    InRecordHeader(R),
    InSubRecordBody(R, S),
    DiscardingSubRecord(R),
}

/// Runs a grammar over the cleaned lines of a report.
///
/// Records are assembled as follows:
///
/// - while no record is open, continuation lines are noise and are skipped;
/// - a record marker seals whatever is open and starts a new record;
/// - continuation lines after a record marker go to the record itself, until
///   the first sub-record marker;
/// - continuation lines after a sub-record marker go to that sub-record;
/// - the end of input seals whatever is open, so a trailing record missing
///   optional lines is still kept.
///
/// When a sub-record fails field extraction and the policy is
/// [`MalformedSectionPolicy::Skip`], the sub-record and its continuation
/// lines are dropped and counted in the summary. Every other error aborts
/// the parse.
///
/// # Errors
///
/// Returns the first error raised by classification or by a grammar hook.
pub fn assemble<G: Grammar>(
    grammar: &mut G,
    lines: &[Line<'_>],
    policy: MalformedSectionPolicy,
) -> Result<Parsed<G::Output>, Error> {
    let mut output = G::Output::default();
    let mut summary = Summary::default();
    let mut state: State<G::Record, G::SubRecord> = State::SeekingRecord;
    let mut cursor = LineCursor::new(G::KIND, lines);

    while let Some(line) = cursor.next() {
        let Some(role) = grammar.classifier().classify(line)? else {
            let result = match &mut state {
                State::SeekingRecord => {
                    tracing::debug!("{}: skipping line {} outside any record", G::KIND, line.index);
                    Ok(false)
                }
                State::InRecordHeader(record) => Ok(grammar.extend_record(record, line)?),
                State::InSubRecordBody(_, sub_record) => grammar.extend_sub_record(sub_record, line),
                State::DiscardingSubRecord(_) => Ok(false),
            };
            let folded = match result {
                Ok(folded) => folded,
                Err(error) => {
                    state = discard(state, error, policy, &mut summary)?;
                    false
                }
            };
            if !folded {
                summary.ignored_lines += 1;
            }
            continue;
        };

        match grammar.transition(role) {
            Transition::Ignore => summary.ignored_lines += 1,
            Transition::Context => {
                seal(grammar, &mut output, state)?;
                state = State::SeekingRecord;
                grammar.enter_context(role, line, &mut cursor)?;
            }
            Transition::NewRecord => {
                seal(grammar, &mut output, state)?;
                summary.records += 1;
                state = State::InRecordHeader(grammar.open_record(role, line, &mut cursor)?);
            }
            Transition::NewSubRecord => {
                let mut record = match state {
                    State::SeekingRecord => {
                        return Err(Error::malformed(
                            G::KIND,
                            line.index,
                            "sub-record outside of any record",
                        ));
                    }
                    State::InRecordHeader(record) | State::DiscardingSubRecord(record) => record,
                    State::InSubRecordBody(mut record, sub_record) => {
                        grammar.seal_sub_record(&mut record, sub_record);
                        record
                    }
                };
                state = match grammar.open_sub_record(&mut record, role, line, &mut cursor) {
                    Ok(sub_record) => {
                        summary.sub_records += 1;
                        State::InSubRecordBody(record, sub_record)
                    }
                    Err(error) => discard(State::InRecordHeader(record), error, policy, &mut summary)?,
                };
            }
        }
    }

    seal(grammar, &mut output, state)?;

    Ok(Parsed {
        records: output,
        summary,
    })
}

fn seal<G: Grammar>(
    grammar: &mut G,
    output: &mut G::Output,
    state: State<G::Record, G::SubRecord>,
) -> Result<(), Error> {
    let record = match state {
        State::SeekingRecord => return Ok(()),
        State::InRecordHeader(record) | State::DiscardingSubRecord(record) => record,
        State::InSubRecordBody(mut record, sub_record) => {
            grammar.seal_sub_record(&mut record, sub_record);
            record
        }
    };
    grammar.seal_record(output, record)
}

/// Applies the malformed section policy to a sub-record that failed.
fn discard<R, S>(
    state: State<R, S>,
    error: Error,
    policy: MalformedSectionPolicy,
    summary: &mut Summary,
) -> Result<State<R, S>, Error> {
    if policy == MalformedSectionPolicy::Fail || !matches!(error, Error::FieldExtraction { .. }) {
        return Err(error);
    }

    let record = match state {
        State::SeekingRecord => return Err(error),
        State::InRecordHeader(record) | State::DiscardingSubRecord(record) => record,
        State::InSubRecordBody(record, _) => {
            // it was counted when it opened
            summary.sub_records = summary.sub_records.saturating_sub(1);
            record
        }
    };

    tracing::warn!("skipping malformed sub-record: {error}");
    summary.skipped_sub_records += 1;
    Ok(State::DiscardingSubRecord(record))
}
