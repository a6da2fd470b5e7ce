//! Board State
//!
//! The list view's two partitions (pending, completed) and every local
//! mutation applied to them: load, drag-and-drop, add, delete, rollback.
//! Network calls live in [`crate::actions`]; nothing here can fail.

use thiserror::Error;

use crate::models::{Todo, TodoId};

/// One of the two ordered lists on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Partition {
    Pending,
    Completed,
}

impl Partition {
    /// DnD list key
    pub const fn key(self) -> &'static str {
        match self {
            Partition::Pending => "todoList",
            Partition::Completed => "completedList",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "todoList" => Some(Partition::Pending),
            "completedList" => Some(Partition::Completed),
            _ => None,
        }
    }

    pub fn for_completed(completed: bool) -> Self {
        if completed {
            Partition::Completed
        } else {
            Partition::Pending
        }
    }

    /// The `completed` flag every member of this partition carries
    pub fn is_completed(self) -> bool {
        self == Partition::Completed
    }
}

/// A finished drag: where the element was and its final index where it landed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropEvent {
    pub previous: Partition,
    pub previous_index: usize,
    pub current: Partition,
    pub current_index: usize,
}

impl DropEvent {
    /// Build from a DnD insertion slot ("before `slot_index`").
    ///
    /// Within one list, the element leaves its old place first, so slots
    /// below it shift up by one.
    pub fn from_slot(previous: Partition, previous_index: usize, current: Partition, slot_index: usize) -> Self {
        let current_index = if previous == current && slot_index > previous_index {
            slot_index - 1
        } else {
            slot_index
        };
        Self {
            previous,
            previous_index,
            current,
            current_index,
        }
    }
}

/// A cross-partition move applied locally and awaiting server confirmation
#[derive(Clone, Debug, PartialEq)]
pub struct PendingMove {
    /// The moved todo as it looks after the move
    pub todo: Todo,
    pub from: Partition,
    pub to: Partition,
}

impl PendingMove {
    /// Status to send to the server
    pub fn new_status(&self) -> bool {
        self.to.is_completed()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DropOutcome {
    /// Order changed within one partition; nothing to confirm
    Reordered,
    /// Moved between partitions; confirm with the server or roll back
    Moved(PendingMove),
    /// Nothing happened (same slot, or stale source index)
    Ignored,
}

/// How an added todo's `completed` flag is resolved
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergePolicy {
    /// The form's choice overrides whatever the server echoed
    ClientWins,
    /// Keep the server record untouched
    ServerWins,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task text is required")]
    Required,
    #[error("Task must be at least {min} characters")]
    TooShort { min: usize },
}

/// Check new-todo text before it is sent. Returns the trimmed text.
pub fn validate_todo_text(text: &str, min_len: usize) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required);
    }
    if trimmed.chars().count() < min_len {
        return Err(ValidationError::TooShort { min: min_len });
    }
    Ok(trimmed)
}

/// Pending and completed partitions of the list view
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Board {
    pending: Vec<Todo>,
    completed: Vec<Todo>,
}

impl Board {
    /// Split a fetched list by `completed`, keeping server order in each half
    pub fn from_todos(todos: Vec<Todo>) -> Self {
        let (completed, pending): (Vec<Todo>, Vec<Todo>) = todos.into_iter().partition(|t| t.completed);
        Self { pending, completed }
    }

    pub fn pending(&self) -> &[Todo] {
        &self.pending
    }

    pub fn completed(&self) -> &[Todo] {
        &self.completed
    }

    pub fn partition(&self, which: Partition) -> &[Todo] {
        match which {
            Partition::Pending => &self.pending,
            Partition::Completed => &self.completed,
        }
    }

    fn partition_mut(&mut self, which: Partition) -> &mut Vec<Todo> {
        match which {
            Partition::Pending => &mut self.pending,
            Partition::Completed => &mut self.completed,
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Locate a todo by id
    pub fn find(&self, id: &TodoId) -> Option<(Partition, usize)> {
        [Partition::Pending, Partition::Completed].into_iter().find_map(|which| {
            self.partition(which)
                .iter()
                .position(|t| &t.id == id)
                .map(|index| (which, index))
        })
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.find(id).map(|(which, index)| &self.partition(which)[index])
    }

    /// Apply a finished drag locally.
    ///
    /// Cross-partition moves flip `completed` right away; the returned
    /// [`PendingMove`] must be confirmed or rolled back by the caller.
    pub fn drop_item(&mut self, event: DropEvent) -> DropOutcome {
        if event.previous == event.current {
            return if self.reorder(event.current, event.previous_index, event.current_index) {
                DropOutcome::Reordered
            } else {
                DropOutcome::Ignored
            };
        }

        let source = self.partition_mut(event.previous);
        if event.previous_index >= source.len() {
            return DropOutcome::Ignored;
        }
        let mut todo = source.remove(event.previous_index);
        todo.completed = event.current.is_completed();

        let target = self.partition_mut(event.current);
        let index = event.current_index.min(target.len());
        target.insert(index, todo.clone());

        DropOutcome::Moved(PendingMove {
            todo,
            from: event.previous,
            to: event.current,
        })
    }

    /// Move an element within one partition. Indices are clamped to the list.
    /// Returns whether the order changed.
    pub fn reorder(&mut self, which: Partition, from: usize, to: usize) -> bool {
        let list = self.partition_mut(which);
        if list.is_empty() {
            return false;
        }
        let last = list.len() - 1;
        let (from, to) = (from.min(last), to.min(last));
        if from == to {
            return false;
        }
        let todo = list.remove(from);
        list.insert(to, todo);
        true
    }

    /// Undo a failed cross-partition move against the *current* partitions:
    /// restore the old `completed` flag, drop the todo from the destination
    /// and append it to the source. The original index is not restored.
    pub fn rollback(&mut self, pending: &PendingMove) {
        let id = &pending.todo.id;
        let destination = self.partition_mut(pending.to);
        let position = destination.iter().position(|t| &t.id == id);
        let mut todo = match position {
            Some(index) => destination.remove(index),
            None => pending.todo.clone(),
        };
        destination.retain(|t| &t.id != id);

        todo.completed = pending.from.is_completed();
        self.partition_mut(pending.from).push(todo);
    }

    /// Place a freshly created todo, resolving its flag per `policy`
    pub fn insert_added(&mut self, mut todo: Todo, completed_intent: bool, policy: MergePolicy) -> Partition {
        if policy == MergePolicy::ClientWins {
            todo.completed = completed_intent;
        }
        let which = Partition::for_completed(todo.completed);
        self.partition_mut(which).push(todo);
        which
    }

    /// Remove a todo from whichever partition holds it
    pub fn remove(&mut self, id: &TodoId) -> Option<Todo> {
        let (which, index) = self.find(id)?;
        Some(self.partition_mut(which).remove(index))
    }

    /// Reconcile a server-confirmed record: replaced in place when its
    /// partition is unchanged, otherwise moved to the end of the other one.
    pub fn apply_server_update(&mut self, todo: Todo) {
        let target = Partition::for_completed(todo.completed);
        match self.find(&todo.id) {
            Some((which, index)) if which == target => {
                self.partition_mut(which)[index] = todo;
            }
            Some((which, index)) => {
                self.partition_mut(which).remove(index);
                self.partition_mut(target).push(todo);
            }
            None => self.partition_mut(target).push(todo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn todo(id: u64, completed: bool) -> Todo {
        Todo::new(id, format!("Task {}", id), completed, 1)
    }

    fn ids(list: &[Todo]) -> Vec<&str> {
        list.iter().map(|t| t.id.as_str()).collect()
    }

    fn sample_board() -> Board {
        Board::from_todos(vec![todo(1, false), todo(2, true)])
    }

    #[test]
    fn test_from_todos_partitions_in_server_order() {
        let board = Board::from_todos(vec![todo(1, false), todo(2, true), todo(3, false), todo(4, true)]);
        assert_eq!(ids(board.pending()), ["1", "3"]);
        assert_eq!(ids(board.completed()), ["2", "4"]);
    }

    #[test]
    fn test_scenario_fetch() {
        let board = sample_board();
        assert_eq!(ids(board.pending()), ["1"]);
        assert_eq!(ids(board.completed()), ["2"]);
    }

    #[test]
    fn test_move_to_completed_applies_optimistically() {
        let mut board = sample_board();
        let outcome = board.drop_item(DropEvent::from_slot(Partition::Pending, 0, Partition::Completed, 1));

        let DropOutcome::Moved(pending) = outcome else {
            panic!("expected a cross-partition move");
        };
        assert!(pending.new_status());
        assert_eq!(pending.from, Partition::Pending);
        assert!(board.pending().is_empty());
        assert_eq!(ids(board.completed()), ["2", "1"]);
        assert!(board.completed()[1].completed);
    }

    #[test]
    fn test_failed_move_rolls_back_by_append() {
        let mut board = Board::from_todos(vec![todo(1, false), todo(3, false), todo(2, true)]);
        let DropOutcome::Moved(pending) =
            board.drop_item(DropEvent::from_slot(Partition::Pending, 0, Partition::Completed, 0))
        else {
            panic!("expected a cross-partition move");
        };
        assert_eq!(ids(board.completed()), ["1", "2"]);

        board.rollback(&pending);
        // Back in its own partition, but appended rather than at index 0
        assert_eq!(ids(board.pending()), ["3", "1"]);
        assert_eq!(ids(board.completed()), ["2"]);
        assert!(!board.pending()[1].completed);
    }

    #[test]
    fn test_rollback_against_changed_partitions() {
        let mut board = sample_board();
        let DropOutcome::Moved(pending) =
            board.drop_item(DropEvent::from_slot(Partition::Pending, 0, Partition::Completed, 0))
        else {
            panic!("expected a cross-partition move");
        };
        // Deleted locally while the update was in flight; rollback still
        // reinserts it from the snapshot
        board.remove(&pending.todo.id);
        board.rollback(&pending);
        assert_eq!(ids(board.pending()), ["1"]);
        assert_eq!(ids(board.completed()), ["2"]);
    }

    #[test]
    fn test_reorder_within_partition() {
        let mut board = Board::from_todos(vec![todo(1, false), todo(2, false), todo(3, false)]);
        let outcome = board.drop_item(DropEvent::from_slot(Partition::Pending, 0, Partition::Pending, 3));
        assert_eq!(outcome, DropOutcome::Reordered);
        assert_eq!(ids(board.pending()), ["2", "3", "1"]);
    }

    #[test]
    fn test_drop_on_own_slot_is_ignored() {
        let mut board = Board::from_todos(vec![todo(1, false), todo(2, false)]);
        let outcome = board.drop_item(DropEvent::from_slot(Partition::Pending, 0, Partition::Pending, 1));
        assert_eq!(outcome, DropOutcome::Ignored);
        assert_eq!(ids(board.pending()), ["1", "2"]);
    }

    #[test]
    fn test_stale_source_index_is_ignored() {
        let mut board = sample_board();
        let outcome = board.drop_item(DropEvent::from_slot(Partition::Pending, 5, Partition::Completed, 0));
        assert_eq!(outcome, DropOutcome::Ignored);
        assert_eq!(board, sample_board());
    }

    #[rstest]
    #[case(Partition::Pending, 0, Partition::Pending, 0, 0)]
    #[case(Partition::Pending, 0, Partition::Pending, 2, 1)]
    #[case(Partition::Pending, 3, Partition::Pending, 1, 1)]
    #[case(Partition::Pending, 1, Partition::Completed, 4, 4)]
    #[case(Partition::Completed, 2, Partition::Pending, 0, 0)]
    fn test_from_slot(
        #[case] from: Partition,
        #[case] from_index: usize,
        #[case] to: Partition,
        #[case] slot: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(DropEvent::from_slot(from, from_index, to, slot).current_index, expected);
    }

    #[rstest]
    #[case("todoList", Some(Partition::Pending))]
    #[case("completedList", Some(Partition::Completed))]
    #[case("other", None)]
    fn test_partition_keys(#[case] key: &str, #[case] expected: Option<Partition>) {
        assert_eq!(Partition::from_key(key), expected);
        if let Some(which) = expected {
            assert_eq!(which.key(), key);
        }
    }

    #[test]
    fn test_add_client_wins_over_server_flag() {
        let mut board = sample_board();
        // Server echoes completed=true, form said pending
        let which = board.insert_added(todo(3, true), false, MergePolicy::ClientWins);
        assert_eq!(which, Partition::Pending);
        assert_eq!(ids(board.pending()), ["1", "3"]);
        assert!(!board.pending()[1].completed);
    }

    #[test]
    fn test_add_server_wins() {
        let mut board = sample_board();
        let which = board.insert_added(todo(3, true), false, MergePolicy::ServerWins);
        assert_eq!(which, Partition::Completed);
        assert_eq!(ids(board.completed()), ["2", "3"]);
    }

    #[test]
    fn test_scenario_add_buy_milk() {
        let mut board = sample_board();
        board.insert_added(Todo::new(3u64, "Buy milk", false, 26), false, MergePolicy::ClientWins);
        let added = board.get(&TodoId::from("3")).unwrap();
        assert_eq!(added.text, "Buy milk");
        assert!(!added.completed);
        assert_eq!(board.find(&added.id.clone()), Some((Partition::Pending, 1)));
    }

    #[test]
    fn test_remove_from_either_partition() {
        let mut board = sample_board();
        let removed = board.remove(&TodoId::from("2")).unwrap();
        assert_eq!(removed.id.as_str(), "2");
        assert!(board.find(&TodoId::from("2")).is_none());
        assert!(board.remove(&TodoId::from("2")).is_none());
        assert_eq!(board.len(), 1);

        board.remove(&TodoId::from("1"));
        assert!(board.is_empty());
        assert!(Board::default().is_empty());
    }

    #[test]
    fn test_apply_server_update() {
        let mut board = Board::from_todos(vec![todo(1, false), todo(3, false), todo(2, true)]);
        let mut renamed = todo(1, false);
        renamed.text = "Renamed".to_string();
        board.apply_server_update(renamed);
        assert_eq!(board.pending()[0].text, "Renamed");

        board.apply_server_update(todo(1, true));
        assert_eq!(ids(board.pending()), ["3"]);
        assert_eq!(ids(board.completed()), ["2", "1"]);
    }

    #[rstest]
    #[case("", Err(ValidationError::Required))]
    #[case("   ", Err(ValidationError::Required))]
    #[case("ab", Err(ValidationError::TooShort { min: 3 }))]
    #[case(" ab ", Err(ValidationError::TooShort { min: 3 }))]
    #[case("abc", Ok("abc"))]
    #[case("  Buy milk ", Ok("Buy milk"))]
    fn test_validate_todo_text(#[case] input: &str, #[case] expected: Result<&str, ValidationError>) {
        assert_eq!(validate_todo_text(input, 3), expected);
    }

    fn arb_board() -> impl Strategy<Value = Board> {
        prop::collection::vec(any::<bool>(), 0..12).prop_map(|flags| {
            Board::from_todos(
                flags
                    .into_iter()
                    .enumerate()
                    .map(|(i, completed)| todo(i as u64, completed))
                    .collect(),
            )
        })
    }

    fn arb_partition() -> impl Strategy<Value = Partition> {
        prop_oneof![Just(Partition::Pending), Just(Partition::Completed)]
    }

    fn sorted_ids(list: &[Todo]) -> Vec<String> {
        let mut ids: Vec<String> = list.iter().map(|t| t.id.to_string()).collect();
        ids.sort();
        ids
    }

    fn is_consistent(board: &Board) -> bool {
        board.pending().iter().all(|t| !t.completed) && board.completed().iter().all(|t| t.completed)
    }

    proptest! {
        #[test]
        fn prop_reorders_keep_membership(
            board in arb_board(),
            which in arb_partition(),
            moves in prop::collection::vec((0usize..16, 0usize..16), 0..20),
        ) {
            let mut board = board;
            let before = sorted_ids(board.partition(which));
            for (from, to) in moves {
                board.reorder(which, from, to);
            }
            prop_assert_eq!(sorted_ids(board.partition(which)), before);
        }

        #[test]
        fn prop_confirmed_move_lands_in_one_partition(
            board in arb_board(),
            from in arb_partition(),
            from_index in 0usize..12,
            slot in 0usize..12,
        ) {
            let mut board = board;
            let to = if from == Partition::Pending { Partition::Completed } else { Partition::Pending };
            let total = board.len();
            if let DropOutcome::Moved(pending) = board.drop_item(DropEvent::from_slot(from, from_index, to, slot)) {
                let (found, _) = board.find(&pending.todo.id).unwrap();
                prop_assert_eq!(found, to);
                prop_assert_eq!(board.get(&pending.todo.id).unwrap().completed, to.is_completed());
                prop_assert_eq!(board.len(), total);
                prop_assert!(is_consistent(&board));
            }
        }

        #[test]
        fn prop_failed_move_restores_partition(
            board in arb_board(),
            from in arb_partition(),
            from_index in 0usize..12,
            slot in 0usize..12,
        ) {
            let original = board.clone();
            let mut board = board;
            let to = if from == Partition::Pending { Partition::Completed } else { Partition::Pending };
            if let DropOutcome::Moved(pending) = board.drop_item(DropEvent::from_slot(from, from_index, to, slot)) {
                board.rollback(&pending);
                prop_assert_eq!(board.find(&pending.todo.id).map(|(p, _)| p), Some(from));
                prop_assert_eq!(board.get(&pending.todo.id).unwrap().completed, from.is_completed());
                prop_assert_eq!(sorted_ids(board.pending()), sorted_ids(original.pending()));
                prop_assert_eq!(sorted_ids(board.completed()), sorted_ids(original.completed()));
                prop_assert!(is_consistent(&board));
            }
        }
    }
}
