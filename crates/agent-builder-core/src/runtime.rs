use std::collections::VecDeque;

use crate::scheduler::Scheduler;
use crate::session::{Action, Effect, WizardSession};

/// Wait out an effect's delay and hand back the action it resolves to
pub async fn run_effect(scheduler: &dyn Scheduler, effect: Effect) -> Action {
    scheduler.sleep(effect.delay()).await;
    effect.follow_up()
}

/// Apply `action` and drive every effect it schedules, in order, until the
/// session is quiet again.
pub async fn settle(session: &mut WizardSession, scheduler: &dyn Scheduler, action: Action) {
    let mut queue = VecDeque::from([action]);
    while let Some(next) = queue.pop_front() {
        for effect in session.apply(next) {
            queue.push_back(run_effect(scheduler, effect).await);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::response_for;
    use crate::scheduler::{ImmediateScheduler, TokioScheduler};
    use crate::state::ChatRole;
    use crate::step::WizardStep;
    use std::time::Duration;

    #[tokio::test]
    async fn test_hello_at_first_step() {
        let mut session = WizardSession::default();
        settle(&mut session, &ImmediateScheduler, Action::SendMessage("Hello".to_string())).await;

        let messages = session.messages().messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(messages[1].content, "Hello");
        assert_eq!(messages[2].role, ChatRole::Assistant);
        assert_eq!(
            messages[2].content,
            "Great! I'd like to understand more about this agent. What specific tasks do you want your agent to perform?"
        );
        assert_eq!(session.step(), WizardStep::SpecifyTasks);
    }

    #[tokio::test]
    async fn test_whitespace_send_changes_nothing() {
        let mut session = WizardSession::default();
        settle(&mut session, &ImmediateScheduler, Action::SendMessage(" \n ".to_string())).await;
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.step(), WizardStep::DefineAgent);
    }

    #[tokio::test]
    async fn test_each_exchange_advances_one_step() {
        let mut session = WizardSession::default();
        for expected in 2..=6 {
            settle(&mut session, &ImmediateScheduler, Action::SendMessage("ok".to_string())).await;
            assert_eq!(session.step().number(), expected);
        }
        settle(&mut session, &ImmediateScheduler, Action::SendMessage("ok".to_string())).await;
        assert_eq!(session.step(), WizardStep::ReviewDeploy);
    }

    #[tokio::test(start_paused = true)]
    async fn test_real_timers_respect_delays() {
        let mut session = WizardSession::default();
        let effects = session.apply(Action::SendMessage("Hello".to_string()));
        assert_eq!(effects.len(), 1);

        let start = tokio::time::Instant::now();
        let reply = run_effect(&TokioScheduler, effects[0]).await;
        assert!(start.elapsed() >= Duration::from_millis(1500));
        assert_eq!(reply, Action::ReplyReady { step: WizardStep::DefineAgent });

        let effects = session.apply(reply);
        let advance = run_effect(&TokioScheduler, effects[0]).await;
        assert!(start.elapsed() >= Duration::from_millis(2500));
        session.apply(advance);

        assert_eq!(
            session.messages().last().map(|m| m.content.as_str()),
            Some(response_for(WizardStep::DefineAgent))
        );
        assert_eq!(session.step(), WizardStep::SpecifyTasks);
    }
}
