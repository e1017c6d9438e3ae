use rankwalk::graph::{preset, Edge, NodeId, Position};
use rankwalk::{RankConfig, RankError, RankSession, RunState, Speed};

fn session_for(name: &str) -> RankSession {
    RankSession::with_graph(preset::by_name(name).unwrap().graph, RankConfig::default()).unwrap()
}

#[test]
fn test_reset_matches_fresh_session() {
    let mut session = session_for("paper-example");
    for _ in 0..7 {
        session.step();
    }
    session.reset();

    let fresh = session_for("paper-example");
    assert_eq!(session.iteration(), 0);
    assert_eq!(session.state(), RunState::Ready);
    assert_eq!(session.ranks(), fresh.ranks());
    assert_eq!(session.history(), fresh.history());
    assert_eq!(session.snapshot(), fresh.snapshot());
}

#[test]
fn test_reset_from_every_state() {
    let mut session = session_for("paper-example");

    session.start();
    session.tick();
    session.reset();
    assert_eq!(session.state(), RunState::Ready);

    session.run_to_convergence();
    assert_eq!(session.state(), RunState::Converged);
    session.reset();
    assert_eq!(session.state(), RunState::Ready);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_moving_a_node_keeps_the_run() {
    let mut session = session_for("paper-example");
    session.run_to_convergence();
    let iterations = session.iteration();

    assert!(session.set_position(&NodeId::new("1"), Position::new(5.0, 5.0)));

    let mut moved = session.graph().clone();
    moved.set_position(&NodeId::new("2"), Position::new(42.0, 7.0));
    moved.set_label(&NodeId::new("3"), "three");
    assert!(!session.set_graph(moved));

    assert_eq!(session.state(), RunState::Converged);
    assert_eq!(session.iteration(), iterations);
    assert_eq!(
        session.graph().node(&NodeId::new("2")).unwrap().position,
        Some(Position::new(42.0, 7.0))
    );
}

#[test]
fn test_editing_edges_resets_the_run() {
    let mut session = session_for("paper-example");
    session.step();
    session.step();

    let mut rewired = session.graph().clone();
    rewired.add_edge("2", "1");
    assert!(session.set_graph(rewired));

    assert_eq!(session.iteration(), 0);
    assert_eq!(session.state(), RunState::Ready);
    assert!(!session.is_converged());
}

#[test]
fn test_adding_a_node_resets_the_run() {
    let mut session = session_for("simple-cycle");
    session.run_to_convergence();

    let mut grown = session.graph().clone();
    grown.add_node(rankwalk::Node::new("D"));
    assert!(session.set_graph(grown));
    assert_eq!(session.ranks().len(), 4);
    assert_eq!(session.ranks()[&NodeId::new("D")], 0.25);
    assert_eq!(session.dangling_nodes(), &[NodeId::new("D")]);
}

#[test]
fn test_duplicate_edge_is_not_a_structural_change() {
    let mut session = session_for("star");
    session.step();

    let mut graph = session.graph().clone();
    graph.edges.push(Edge::new("1", "hub"));
    assert!(!session.set_graph(graph));
    assert_eq!(session.iteration(), 1);
}

#[test]
fn test_step_records_are_snapshots() {
    let mut session = session_for("rank-sink");
    let first = session.step().unwrap();
    let second = session.step().unwrap();

    assert_ne!(first.ranks, second.ranks);
    assert_eq!(session.history()[1], first);
    assert_eq!(session.history()[2], second);
}

#[test]
fn test_running_session_reports_terminal_state() {
    let mut session = session_for("simple-cycle");
    assert!(session.start());
    assert!(session.is_running());

    let record = session.tick().unwrap();
    assert!(record.converged);
    assert_eq!(session.state(), RunState::Converged);
    assert!(!session.is_running());
    assert!(session.tick().is_none());
}

#[test]
fn test_config_errors_fail_fast() {
    let graph = preset::paper_example().graph;

    let err = RankSession::with_graph(graph.clone(), RankConfig::default().with_alpha(0.0)).unwrap_err();
    assert!(matches!(err, RankError::InvalidDampingFactor(_)));

    let err = RankSession::with_graph(graph.clone(), RankConfig::default().with_epsilon(-1.0)).unwrap_err();
    assert!(matches!(err, RankError::InvalidTolerance(_)));

    let err = RankSession::with_graph(graph, RankConfig::default().with_max_iterations(0)).unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_epsilon_change_restarts_but_speed_does_not() {
    let mut session = session_for("paper-example");
    session.step();

    assert!(!session.set_config(RankConfig::default().with_speed(Speed::Fast)).unwrap());
    assert_eq!(session.iteration(), 1);
    assert_eq!(session.config().speed, Speed::Fast);

    assert!(session.set_config(RankConfig::default().with_epsilon(1e-9)).unwrap());
    assert_eq!(session.iteration(), 0);
}
