use onboard_core::auth::AuthOp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    SignIn,
    SignUp,
    SignOut,
}

impl TaskKind {
    pub fn for_op(op: AuthOp) -> Self {
        match op {
            AuthOp::SignIn => TaskKind::SignIn,
            AuthOp::SignUp => TaskKind::SignUp,
            AuthOp::SignOut => TaskKind::SignOut,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Marks `id` active as soon as the reducer emits its effect, so a second
    /// submission in the same frame sees the task as running.
    pub fn begin(&mut self, id: TaskId) {
        self.active = Some(id);
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub sign_in: TaskState,
    pub sign_up: TaskState,
    pub sign_out: TaskState,
}

impl Tasks {
    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::SignIn => &mut self.sign_in,
            TaskKind::SignUp => &mut self.sign_up,
            TaskKind::SignOut => &mut self.sign_out,
        }
    }

    /// True while a credential submission (sign in or sign up) is in flight.
    pub fn is_form_busy(&self) -> bool {
        self.sign_in.is_running() || self.sign_up.is_running()
    }

    pub fn is_any_running(&self) -> bool {
        self.is_form_busy() || self.sign_out.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_seq_increments() {
        let mut seq = TaskSeq::default();
        assert_eq!(seq.next_id(), TaskId(0));
        assert_eq!(seq.next_id(), TaskId(1));
    }

    #[test]
    fn test_finish_only_matching_task() {
        let mut state = TaskState::default();
        state.begin(TaskId(3));

        assert!(!state.finish_if_active(TaskId(2)));
        assert!(state.is_running());
        assert!(state.finish_if_active(TaskId(3)));
        assert!(!state.is_running());
    }

    #[test]
    fn test_form_busy_ignores_sign_out() {
        let mut tasks = Tasks::default();
        tasks.state_mut(TaskKind::SignOut).begin(TaskId(0));
        assert!(!tasks.is_form_busy());
        assert!(tasks.is_any_running());

        tasks.state_mut(TaskKind::SignUp).begin(TaskId(1));
        assert!(tasks.is_form_busy());
    }
}
