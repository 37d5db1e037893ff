use crate::heuristic::{order_by_score, score};
use crate::strategy::{MoveStats, Strategy};
use cuttle_core::executor::execute;
use cuttle_core::generator::legal_moves;
use cuttle_core::model::game_state::GameState;
use cuttle_core::moves::Move;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Hyperparameters for perfect-information MCTS (§4.6). Defaults mirror the
/// reference strategy's tuned values.
#[derive(Debug, Clone, Copy)]
pub struct MctsConfig {
    pub iterations: u32,
    pub exploration_constant: f64,
    pub max_simulation_depth: u32,
    pub rollout_epsilon: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration_constant: std::f64::consts::SQRT_2,
            max_simulation_depth: 200,
            rollout_epsilon: 0.2,
        }
    }
}

struct Node {
    state: GameState,
    mv: Option<Move>,
    player_just_moved: Option<usize>,
    visits: u32,
    wins: f64,
    parent: Option<usize>,
    children: Vec<usize>,
    untried_moves: Vec<Move>,
}

impl Node {
    fn is_terminal(&self) -> bool {
        self.state.is_game_over()
    }

    fn is_fully_expanded(&self) -> bool {
        self.untried_moves.is_empty()
    }

    fn ucb1(&self, parent_visits: u32, exploration: f64) -> f64 {
        if self.visits == 0 || parent_visits == 0 {
            return f64::INFINITY;
        }
        let exploitation = self.wins / self.visits as f64;
        let exploration_term = exploration * ((parent_visits as f64).ln() / self.visits as f64).sqrt();
        exploitation + exploration_term
    }
}

/// UCB1 perfect-information tree search (§4.6). Each `select_move` call
/// builds a fresh tree from `state`.
pub struct MctsStrategy {
    config: MctsConfig,
    rng: StdRng,
}

impl MctsStrategy {
    pub fn new(config: MctsConfig, seed: u64) -> Self {
        Self { config, rng: StdRng::seed_from_u64(seed) }
    }

    fn new_node(&self, state: GameState, mv: Option<Move>, player_just_moved: Option<usize>, parent: Option<usize>) -> Node {
        let moves = legal_moves(&state);
        let untried_moves = order_by_score(&state, &moves);
        Node { state, mv, player_just_moved, visits: 0, wins: 0.0, parent, children: Vec::new(), untried_moves }
    }

    fn select_child(&self, arena: &[Node], node: usize) -> usize {
        let parent_visits = arena[node].visits;
        arena[node]
            .children
            .iter()
            .copied()
            .max_by(|&a, &b| {
                arena[a]
                    .ucb1(parent_visits, self.config.exploration_constant)
                    .partial_cmp(&arena[b].ucb1(parent_visits, self.config.exploration_constant))
                    .unwrap()
            })
            .expect("selection only runs when children is non-empty")
    }

    /// Runs one full MCTS iteration, returning the arena-final tree state
    /// via mutation. Selection descends by UCB1; expansion tries untried
    /// moves (best heuristic score first) until the executor accepts one;
    /// simulation rolls out epsilon-greedy; backpropagation flips perspective
    /// per ancestor level.
    fn run_iteration(&mut self, arena: &mut Vec<Node>, root: usize) {
        let mut node = root;

        while !arena[node].is_terminal() && arena[node].is_fully_expanded() && !arena[node].children.is_empty() {
            node = self.select_child(arena, node);
        }

        if !arena[node].is_terminal() {
            while let Some(&candidate) = arena[node].untried_moves.first() {
                let parent_state = arena[node].state.clone();
                match execute(&parent_state, candidate) {
                    Ok(new_state) => {
                        let mover = parent_state.acting_player();
                        let child = self.new_node(new_state, Some(candidate), Some(mover), Some(node));
                        let child_idx = arena.len();
                        arena.push(child);
                        arena[node].untried_moves.remove(0);
                        arena[node].children.push(child_idx);
                        node = child_idx;
                        break;
                    }
                    Err(_) => {
                        arena[node].untried_moves.remove(0);
                    }
                }
            }
        }

        let result = self.simulate(&arena[node].state, arena[node].player_just_moved);
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

    /// Epsilon-greedy rollout to a terminal state or the depth cap. Returns
    /// the result from `perspective`'s point of view, or 0.5 if there is no
    /// perspective (a terminal root with nobody having moved yet).
    fn simulate(&mut self, state: &GameState, perspective: Option<usize>) -> f64 {
        let Some(perspective) = perspective else { return 0.5 };

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

impl Strategy for MctsStrategy {
    fn select_move(&mut self, state: &GameState, legal: &[Move]) -> (Move, Vec<MoveStats>) {
        assert!(!legal.is_empty(), "select_move requires at least one legal move");
        if legal.len() == 1 {
            return (legal[0], vec![MoveStats::new(legal[0], 1, 0.5, None)]);
        }

        let mut arena = vec![self.new_node(state.clone(), None, None, None)];
        let root = 0;

        for _ in 0..self.config.iterations {
            self.run_iteration(&mut arena, root);
        }

        if arena[root].children.is_empty() {
            let idx = self.rng.gen_range(0..legal.len());
            return (legal[idx], Vec::new());
        }

        let stats: Vec<MoveStats> = arena[root]
            .children
            .iter()
            .map(|&c| MoveStats::new(arena[c].mv.unwrap(), arena[c].visits, arena[c].wins, None))
            .collect();

        let best = stats.iter().max_by_key(|s| s.visits).unwrap();
        if tracing::enabled!(target: "cuttle_search::mcts", tracing::Level::DEBUG) {
            tracing::debug!(
                target: "cuttle_search::mcts",
                iterations = self.config.iterations,
                root_visits = arena[root].visits,
                chosen = ?best.mv,
                "mcts search complete"
            );
        }
        (best.mv, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::{MctsConfig, MctsStrategy};
    use crate::strategy::Strategy;
    use cuttle_core::generator::legal_moves;
    use cuttle_core::model::game_state::GameState;

    #[test]
    fn single_legal_move_is_returned_without_search() {
        let state = GameState::initial(Some(1));
        let moves = legal_moves(&state);
        let single = [moves[0]];
        let mut mcts = MctsStrategy::new(MctsConfig { iterations: 10, ..MctsConfig::default() }, 1);
        let (chosen, stats) = mcts.select_move(&state, &single);
        assert_eq!(chosen, single[0]);
        assert_eq!(stats.len(), 1);
    }

    #[test]
    fn search_picks_a_legal_move_and_reports_visit_stats() {
        let state = GameState::initial(Some(2));
        let moves = legal_moves(&state);
        let mut mcts = MctsStrategy::new(MctsConfig { iterations: 50, ..MctsConfig::default() }, 2);
        let (chosen, stats) = mcts.select_move(&state, &moves);
        assert!(moves.contains(&chosen));
        assert!(stats.iter().map(|s| s.visits).sum::<u32>() <= 50);
    }

    #[test]
    fn more_iterations_does_not_reduce_total_visits() {
        let state = GameState::initial(Some(3));
        let moves = legal_moves(&state);
        let mut few = MctsStrategy::new(MctsConfig { iterations: 20, ..MctsConfig::default() }, 3);
        let (_, few_stats) = few.select_move(&state, &moves);
        let mut many = MctsStrategy::new(MctsConfig { iterations: 200, ..MctsConfig::default() }, 3);
        let (_, many_stats) = many.select_move(&state, &moves);
        let few_total: u32 = few_stats.iter().map(|s| s.visits).sum();
        let many_total: u32 = many_stats.iter().map(|s| s.visits).sum();
        assert!(many_total >= few_total);
    }
}
