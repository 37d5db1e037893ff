use super::determinize::determinize;
use super::knowledge::Knowledge;
use crate::heuristic::{order_by_score, score};
use crate::strategy::{MoveStats, Strategy};
use cuttle_core::executor::execute;
use cuttle_core::generator::legal_moves;
use cuttle_core::model::game_state::GameState;
use cuttle_core::moves::Move;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Hyperparameters for information-set MCTS (§4.7). `exploration_constant`
/// defaults lower than perfect-info MCTS's √2: availability-count UCB1
/// needs less exploration pressure than visit-count UCB1.
#[derive(Debug, Clone, Copy)]
pub struct IsmctsConfig {
    pub iterations: u32,
    pub exploration_constant: f64,
    pub max_simulation_depth: u32,
    pub rollout_epsilon: f64,
}

impl Default for IsmctsConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration_constant: 0.7,
            max_simulation_depth: 200,
            rollout_epsilon: 0.2,
        }
    }
}

struct Node {
    mv: Option<Move>,
    player_just_moved: Option<usize>,
    visits: u32,
    wins: f64,
    availability: u32,
    parent: Option<usize>,
    children: HashMap<Move, usize>,
}

impl Node {
    fn root() -> Self {
        Self {
            mv: None,
            player_just_moved: None,
            visits: 0,
            wins: 0.0,
            availability: 0,
            parent: None,
            children: HashMap::new(),
        }
    }

    fn child(mv: Move, player_just_moved: Option<usize>, parent: usize) -> Self {
        Self {
            mv: Some(mv),
            player_just_moved,
            visits: 0,
            wins: 0.0,
            availability: 0,
            parent: Some(parent),
            children: HashMap::new(),
        }
    }

    /// UCB1 with `ln(availability_count)` standing in for `ln(parent.visits)`
    /// (§4.7): availability counts iterations where this child was a legal
    /// move across determinizations, whether or not it was selected.
    fn ucb1(&self, exploration: f64) -> f64 {
        if self.visits == 0 || self.availability == 0 {
            return f64::INFINITY;
        }
        let exploitation = self.wins / self.visits as f64;
        let exploration_term = exploration * ((self.availability as f64).ln() / self.visits as f64).sqrt();
        exploitation + exploration_term
    }
}

/// Information-set MCTS: a single tree shared across per-iteration
/// determinizations, keyed by move so that equal moves from different
/// determinizations land on the same child (§4.7).
pub struct IsmctsStrategy {
    config: IsmctsConfig,
    rng: StdRng,
    knowledge: Knowledge,
}

impl IsmctsStrategy {
    pub fn new(config: IsmctsConfig, seed: u64) -> Self {
        Self { config, rng: StdRng::seed_from_u64(seed), knowledge: Knowledge::new() }
    }

    /// Folds a just-executed transition into this strategy's observation
    /// tracker (§4.7). Call once per real move as a match progresses; a
    /// fresh `select_move` call reuses whatever has accumulated so far.
    pub fn observe(&mut self, before: &GameState, after: &GameState, mv: &Move) {
        self.knowledge.observe(before, after, mv);
    }

    fn run_iteration(&mut self, arena: &mut Vec<Node>, root: usize, root_state: &GameState, perspective: usize) {
        let mut state = determinize(root_state, perspective, &self.knowledge, &mut self.rng);
        let mut node = root;

        loop {
            if state.is_game_over() {
                break;
            }
            let legal = legal_moves(&state);
            if legal.is_empty() {
                break;
            }

            for mv in &legal {
                if let Some(&child_idx) = arena[node].children.get(mv) {
                    arena[child_idx].availability += 1;
                }
            }

            let untried: Vec<Move> = legal.iter().copied().filter(|m| !arena[node].children.contains_key(m)).collect();

            if untried.is_empty() {
                let selected = *legal
                    .iter()
                    .max_by(|&&a, &&b| {
                        let ca = arena[arena[node].children[&a]].ucb1(self.config.exploration_constant);
                        let cb = arena[arena[node].children[&b]].ucb1(self.config.exploration_constant);
                        ca.partial_cmp(&cb).unwrap()
                    })
                    .expect("legal is non-empty here");
                node = arena[node].children[&selected];
                state = execute(&state, selected).expect("generator output must execute against its own state");
                continue;
            }

            let ordered = order_by_score(&state, &untried);
            for candidate in ordered {
                if let Ok(new_state) = execute(&state, candidate) {
                    let mover = state.acting_player();
                    let child = Node::child(candidate, Some(mover), node);
                    let child_idx = arena.len();
                    arena.push(child);
                    arena[node].children.insert(candidate, child_idx);
                    arena[child_idx].availability += 1;
                    node = child_idx;
                    state = new_state;
                    break;
                }
            }
            break;
        }

        let result = self.simulate(&state, arena[node].player_just_moved);
        self.backprop(arena, node, result);
    }

    fn backprop(&self, arena: &mut [Node], mut node: usize, mut result: f64) {
        loop {
            arena[node].visits += 1;
            if arena[node].player_just_moved.is_some() {
                arena[node].wins += result;
                result = 1.0 - result;
            }
            match arena[node].parent {
                Some(parent) => node = parent,
                None => break,
            }
        }
    }

    /// Evaluates a rollout from `perspective`, the expansion node's
    /// `player_just_moved` (§4.6, inherited by §4.7) — never the search
    /// root's acting player, which would be the wrong side of the board for
    /// half the tree by parity.
    fn simulate(&mut self, state: &GameState, perspective: Option<usize>) -> f64 {
        let Some(perspective) = perspective else {
            return 0.5;
        };

        let mut current = state.clone();
        let mut depth = 0;
        while !current.is_game_over() && depth < self.config.max_simulation_depth {
            let moves = legal_moves(&current);
            if moves.is_empty() {
                break;
            }
            let chosen = self.epsilon_greedy_choice(&current, &moves);
            match execute(&current, chosen) {
                Ok(next) => current = next,
                Err(_) => break,
            }
            depth += 1;
        }

        if !current.is_game_over() {
            let mine = current.player(perspective).point_total();
            let theirs = current.player(1 - perspective).point_total();
            return if mine > theirs {
                0.7
            } else if theirs > mine {
                0.3
            } else {
                0.5
            };
        }

        match current.winner() {
            Some(winner) if winner == perspective => 1.0,
            Some(_) => 0.0,
            None => 0.5,
        }
    }

    fn epsilon_greedy_choice(&mut self, state: &GameState, moves: &[Move]) -> Move {
        if self.rng.gen::<f64>() < self.config.rollout_epsilon {
            let idx = self.rng.gen_range(0..moves.len());
            return moves[idx];
        }
        let best = moves.iter().map(|m| score(state, m)).max().unwrap();
        let ties: Vec<Move> = moves.iter().copied().filter(|m| score(state, m) == best).collect();
        let idx = self.rng.gen_range(0..ties.len());
        ties[idx]
    }
}

impl Strategy for IsmctsStrategy {
    fn select_move(&mut self, state: &GameState, legal: &[Move]) -> (Move, Vec<MoveStats>) {
        assert!(!legal.is_empty(), "select_move requires at least one legal move");
        if legal.len() == 1 {
            return (legal[0], vec![MoveStats::new(legal[0], 1, 0.5, Some(1))]);
        }

        let perspective = state.acting_player();
        let mut arena = vec![Node::root()];
        let root = 0;

        for _ in 0..self.config.iterations {
            self.run_iteration(&mut arena, root, state, perspective);
        }

        if arena[root].children.is_empty() {
            let idx = self.rng.gen_range(0..legal.len());
            return (legal[idx], Vec::new());
        }

        let stats: Vec<MoveStats> = arena[root]
            .children
            .iter()
            .map(|(&mv, &idx)| MoveStats::new(mv, arena[idx].visits, arena[idx].wins, Some(arena[idx].availability)))
            .collect();

        let best = stats
            .iter()
            .max_by(|a, b| {
                a.visits
                    .cmp(&b.visits)
                    .then(a.win_rate.partial_cmp(&b.win_rate).unwrap())
            })
            .unwrap();
        if tracing::enabled!(target: "cuttle_search::ismcts", tracing::Level::DEBUG) {
            tracing::debug!(
                target: "cuttle_search::ismcts",
                iterations = self.config.iterations,
                root_visits = arena[root].visits,
                chosen = ?best.mv,
                "ismcts search complete"
            );
        }
        (best.mv, stats)
    }
}
