//! Condition gating and event-hub integration.
//!
//! Conditions are re-checked at both transitions; failures report the
//! full failing subset through dedicated channels and never mutate
//! state.

use std::cell::Cell;
use std::rc::Rc;

use quest_engine::{
    ConditionRegistry, ConditionSpec, EventHub, GateKind, ManagerConfig, Quest, QuestChannel,
    QuestCondition, QuestEvent, QuestLine, QuestLineDefinition, QuestDefinition, QuestManager,
    RewardRegistry, Step, StepDefinition, StepState,
};

/// A condition whose gates can be flipped from the test.
#[derive(Debug)]
struct Switch {
    start: Rc<Cell<bool>>,
    complete: Rc<Cell<bool>>,
}

impl Switch {
    fn new() -> (Self, Rc<Cell<bool>>, Rc<Cell<bool>>) {
        let start = Rc::new(Cell::new(false));
        let complete = Rc::new(Cell::new(false));
        (
            Self {
                start: Rc::clone(&start),
                complete: Rc::clone(&complete),
            },
            start,
            complete,
        )
    }
}

impl QuestCondition for Switch {
    fn kind(&self) -> &str {
        "switch"
    }
    fn can_start(&self) -> bool {
        self.start.get()
    }
    fn can_complete(&self) -> bool {
        self.complete.get()
    }
}

fn gated_manager() -> (QuestManager, Rc<Cell<bool>>, Rc<Cell<bool>>) {
    let (switch, start, complete) = Switch::new();
    let quest = Quest::new(
        "QL0_Q0",
        vec![Step::new("QL0_Q0_S0").with_condition(Box::new(switch))],
    );
    let line = QuestLine::new("QL0", vec![quest]);
    (
        QuestManager::new(vec![line], ManagerConfig::default()),
        start,
        complete,
    )
}

#[test]
fn test_start_conditions_rechecked_each_attempt() {
    let (mut manager, start, _) = gated_manager();
    let step = "QL0_Q0_S0".into();

    let report = manager.start_step(&step).unwrap();
    assert!(!report.accepted);
    match &report.events[0] {
        QuestEvent::StartConditionsNotMet(info) => {
            assert_eq!(info.gate, GateKind::StepStartConditions);
            assert_eq!(info.conditions, vec!["switch".to_owned()]);
        }
        other => panic!("expected StartConditionsNotMet, got {other:?}"),
    }
    assert_eq!(manager.step_state(&step).unwrap(), StepState::NotStarted);

    // Same call succeeds once the game state changes.
    start.set(true);
    assert!(manager.start_step(&step).unwrap().accepted);
}

#[test]
fn test_complete_conditions_gate_independently() {
    let (mut manager, start, complete) = gated_manager();
    let step = "QL0_Q0_S0".into();

    start.set(true);
    let _ = manager.start_step(&step).unwrap();

    let report = manager.complete_step(&step).unwrap();
    assert!(!report.accepted);
    match &report.events[0] {
        QuestEvent::CompleteConditionsNotMet(info) => {
            assert_eq!(info.gate, GateKind::StepCompleteConditions);
        }
        other => panic!("expected CompleteConditionsNotMet, got {other:?}"),
    }
    assert_eq!(manager.step_state(&step).unwrap(), StepState::Started);

    complete.set(true);
    assert!(manager.complete_step(&step).unwrap().accepted);
}

/// All failing conditions are reported, not just the first.
#[test]
fn test_all_failing_conditions_reported() {
    let quest = Quest::new(
        "QL0_Q0",
        vec![Step::new("QL0_Q0_S0")
            .with_condition(Box::new(quest_engine::conditions::Never))
            .with_condition(Box::new(quest_engine::conditions::Always))
            .with_condition(Box::new(quest_engine::conditions::Never))],
    );
    let line = QuestLine::new("QL0", vec![quest]);
    let mut manager = QuestManager::new(vec![line], ManagerConfig::default());

    let report = manager.start_step(&"QL0_Q0_S0".into()).unwrap();
    match &report.events[0] {
        QuestEvent::StartConditionsNotMet(info) => {
            assert_eq!(info.conditions, vec!["never".to_owned(), "never".to_owned()]);
        }
        other => panic!("expected StartConditionsNotMet, got {other:?}"),
    }
}

/// Definition -> registry build -> play -> save -> restore round trip.
#[test]
fn test_content_built_manager_round_trips() {
    let definitions = vec![QuestLineDefinition::new("QL0").with_quest(
        QuestDefinition::new("QL0_Q0")
            .with_step(StepDefinition::new("QL0_Q0_S0").with_condition(ConditionSpec::new("always")))
            .with_step(StepDefinition::new("QL0_Q0_S1").with_requirement("QL0_Q0_S0")),
    )];

    let conditions = ConditionRegistry::new();
    let rewards = RewardRegistry::new();
    let mut manager = QuestManager::from_definitions(
        &definitions,
        &conditions,
        &rewards,
        ManagerConfig::default(),
    )
    .unwrap();

    let _ = manager.complete_step(&"QL0_Q0_S0".into()).unwrap();
    let blob = manager.create_save_data().to_json().unwrap();

    let mut restored = QuestManager::from_definitions(
        &definitions,
        &conditions,
        &rewards,
        ManagerConfig::default(),
    )
    .unwrap();
    restored.initialize_from_json(&blob).unwrap();

    assert_eq!(
        restored.step_state(&"QL0_Q0_S0".into()).unwrap(),
        StepState::Completed
    );
    assert!(restored.can_start_step(&"QL0_Q0_S1".into()).unwrap());
}

/// Hub listeners observe each transition exactly once, per channel.
#[test]
fn test_hub_sees_each_transition_once() {
    let quest = Quest::new(
        "QL0_Q0",
        vec![Step::new("QL0_Q0_S0"), Step::new("QL0_Q0_S1")],
    );
    let line = QuestLine::new("QL0", vec![quest]);
    let mut manager = QuestManager::new(vec![line], ManagerConfig::default());

    let mut hub = EventHub::new();
    let step_completes = Rc::new(Cell::new(0));
    let line_completes = Rc::new(Cell::new(0));

    let sc = Rc::clone(&step_completes);
    hub.subscribe(QuestChannel::StepComplete, move |_| sc.set(sc.get() + 1));
    let lc = Rc::clone(&line_completes);
    hub.subscribe(QuestChannel::QuestLineComplete, move |info| {
        assert_eq!(info.step.as_str(), "QL0_Q0_S1");
        lc.set(lc.get() + 1);
    });

    for id in ["QL0_Q0_S0", "QL0_Q0_S1"] {
        let report = manager.complete_step(&id.into()).unwrap();
        hub.dispatch_all(&report.events);
    }

    assert_eq!(step_completes.get(), 1);
    assert_eq!(line_completes.get(), 1);
}
