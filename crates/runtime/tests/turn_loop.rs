//! Full turn loop against a small in-process arena.

use std::collections::VecDeque;

use game_core::{AgentId, Direction, EntityRecord, Handshake, Position, TurnSnapshot};
use runtime::{Command, Order, Runtime};

const COUNTDOWN: i32 = 8;

struct ArenaBomb {
    position: Position,
    timer: i32,
    range: i32,
}

/// Minimal single-agent game: bombs tick down after every command and go off
/// when their timer reaches 1, destroying the first box on each axis.
struct Arena {
    rows: Vec<Vec<char>>,
    agent: Position,
    bombs_available: i32,
    range: i32,
    bombs: Vec<ArenaBomb>,
}

impl Arena {
    fn new(rows: &[String], agent: Position, range: i32) -> Self {
        Self {
            rows: rows.iter().map(|row| row.chars().collect()).collect(),
            agent,
            bombs_available: 1,
            range,
            bombs: Vec::new(),
        }
    }

    fn cell(&self, position: Position) -> Option<char> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        self.rows
            .get(position.y as usize)
            .and_then(|row| row.get(position.x as usize))
            .copied()
    }

    fn bomb_at(&self, position: Position) -> Option<usize> {
        self.bombs.iter().position(|bomb| bomb.position == position)
    }

    fn snapshot(&self) -> TurnSnapshot {
        let rows = self.rows.iter().map(|row| row.iter().collect()).collect();
        let mut entities = vec![EntityRecord::agent(
            0,
            self.agent.x,
            self.agent.y,
            self.bombs_available,
            self.range,
        )];
        entities.extend(self.bombs.iter().map(|bomb| {
            EntityRecord::bomb(0, bomb.position.x, bomb.position.y, bomb.timer, bomb.range)
        }));
        TurnSnapshot::new(rows, entities)
    }

    fn walkable(&self, position: Position) -> bool {
        self.cell(position) == Some('.') && self.bomb_at(position).is_none()
    }

    /// First step of a shortest walkable path to `target`, or stay.
    fn step_toward(&self, target: Position) -> Position {
        let mut previous = std::collections::HashMap::new();
        let mut open = VecDeque::from([self.agent]);
        previous.insert(self.agent, self.agent);

        while let Some(current) = open.pop_front() {
            if current == target {
                let mut step = current;
                while previous[&step] != self.agent {
                    step = previous[&step];
                }
                return step;
            }
            for direction in Direction::ALL {
                let next = current.step(direction);
                if self.walkable(next) && !previous.contains_key(&next) {
                    previous.insert(next, current);
                    open.push_back(next);
                }
            }
        }
        self.agent
    }

    /// Applies one command and returns the cells hit by explosions this turn.
    fn apply(&mut self, command: &Command) -> Vec<Position> {
        if let Order::Bomb(_) = command.order {
            if self.bombs_available > 0 && self.bomb_at(self.agent).is_none() {
                self.bombs.push(ArenaBomb {
                    position: self.agent,
                    timer: COUNTDOWN,
                    range: self.range,
                });
                self.bombs_available -= 1;
            }
        }
        self.agent = self.step_toward(command.target());
        for bomb in &mut self.bombs {
            bomb.timer -= 1;
        }
        self.detonate()
    }

    fn detonate(&mut self) -> Vec<Position> {
        let mut blown = vec![false; self.bombs.len()];
        let mut queue = VecDeque::new();
        for (index, bomb) in self.bombs.iter().enumerate() {
            if bomb.timer <= 1 {
                blown[index] = true;
                queue.push_back(index);
            }
        }

        let mut blast = Vec::new();
        let mut broken = Vec::new();
        while let Some(index) = queue.pop_front() {
            let (origin, range) = (self.bombs[index].position, self.bombs[index].range);
            blast.push(origin);
            for direction in Direction::ALL {
                let mut position = origin;
                for _ in 1..range {
                    position = position.step(direction);
                    match self.cell(position) {
                        None | Some('X') => break,
                        Some('0' | '1' | '2') => {
                            blast.push(position);
                            broken.push(position);
                            break;
                        }
                        _ => {}
                    }
                    blast.push(position);
                    if let Some(other) = self.bomb_at(position) {
                        if !blown[other] {
                            blown[other] = true;
                            queue.push_back(other);
                        }
                        break;
                    }
                }
            }
        }

        for position in broken {
            self.rows[position.y as usize][position.x as usize] = '.';
        }
        let before = self.bombs.len();
        let mut index = 0;
        self.bombs.retain(|_| {
            let keep = !blown[index];
            index += 1;
            keep
        });
        self.bombs_available += (before - self.bombs.len()) as i32;
        blast
    }
}

fn open_board(width: usize, height: usize) -> Vec<String> {
    vec![".".repeat(width); height]
}

fn runtime(width: u32, height: u32) -> Runtime {
    Runtime::builder()
        .handshake(Handshake::new(width, height, AgentId(0)))
        .build()
        .unwrap()
}

#[test]
fn bombs_adjacent_box_and_waits_out_the_blast() {
    let mut rows = open_board(13, 11);
    rows[0] = ".0...........".to_owned();
    let mut arena = Arena::new(&rows, Position::ORIGIN, 3);
    let mut runtime = runtime(13, 11);

    let first = runtime.play_turn(&arena.snapshot()).unwrap();
    assert_eq!(first, Command::bomb(Position::ORIGIN));
    assert!(arena.apply(&first).is_empty());

    let zone = [
        Position::new(0, 0),
        Position::new(1, 0),
        Position::new(0, 1),
        Position::new(0, 2),
    ];
    let mut left_zone = false;
    let mut detonated = false;

    for turn in 0..12 {
        let command = runtime.play_turn(&arena.snapshot()).unwrap();
        if !detonated {
            assert!(!command.is_bomb(), "turn {turn}: bombed again: {command}");
        }

        let blast = arena.apply(&command);
        if !blast.is_empty() {
            assert!(!blast.contains(&arena.agent), "turn {turn}: caught at {}", arena.agent);
            detonated = true;
        }
        if !detonated {
            let inside = zone.contains(&arena.agent);
            assert!(!(left_zone && inside), "turn {turn}: re-entered blast at {}", arena.agent);
            left_zone |= !inside;
        }
    }

    assert!(detonated);
    assert!(left_zone);
    assert_eq!(arena.cell(Position::new(1, 0)), Some('.'));
    assert_eq!(arena.bombs_available, 1);
}

#[test]
fn dodges_an_enemy_bomb_about_to_explode() {
    let mut runtime = runtime(13, 11);
    let rows = open_board(13, 11);
    let snapshot = TurnSnapshot::new(
        rows,
        vec![
            EntityRecord::agent(0, 1, 0, 1, 3),
            EntityRecord::agent(1, 12, 10, 0, 3),
            EntityRecord::bomb(1, 2, 0, 2, 3),
        ],
    );

    let command = runtime.play_turn(&snapshot).unwrap();
    assert_eq!(command, Command::move_to(Position::new(1, 1)));
}

#[test]
fn clears_a_row_of_boxes() {
    let mut rows = open_board(7, 5);
    rows[2] = "0.0.0.0".to_owned();
    let mut arena = Arena::new(&rows, Position::new(3, 0), 2);
    let mut runtime = runtime(7, 5);

    for turn in 0..30 {
        let command = runtime.play_turn(&arena.snapshot()).unwrap();
        let blast = arena.apply(&command);
        assert!(!blast.contains(&arena.agent), "turn {turn}: caught at {}", arena.agent);
    }

    let remaining = arena
        .rows
        .iter()
        .flatten()
        .filter(|&&cell| cell == '0')
        .count();
    assert!(remaining < 4, "no box destroyed");
}

#[test]
fn walks_to_a_remote_site_before_bombing() {
    let mut rows = open_board(7, 5);
    rows[0] = "....0..".to_owned();
    let mut arena = Arena::new(&rows, Position::ORIGIN, 2);
    let mut runtime = runtime(7, 5);

    let first = runtime.play_turn(&arena.snapshot()).unwrap();
    assert!(!first.is_bomb(), "bombed from the start cell: {first}");
    arena.apply(&first);

    let mut bombed_from = None;
    for turn in 0..20 {
        let command = runtime.play_turn(&arena.snapshot()).unwrap();
        if command.is_bomb() && bombed_from.is_none() {
            bombed_from = Some(arena.agent);
        }
        let blast = arena.apply(&command);
        assert!(!blast.contains(&arena.agent), "turn {turn}: caught at {}", arena.agent);
    }

    let site = bombed_from.expect("never bombed");
    assert_ne!(site, Position::ORIGIN);
    assert_eq!(arena.cell(Position::new(4, 0)), Some('.'));
}

#[test]
fn never_bombs_inside_a_dead_end() {
    let rows: Vec<String> = ["X0X", "X.X", "X.X", "X.X"]
        .iter()
        .map(|row| row.to_string())
        .collect();
    let mut arena = Arena::new(&rows, Position::new(1, 3), 3);
    let mut runtime = runtime(3, 4);

    for turn in 0..12 {
        let command = runtime.play_turn(&arena.snapshot()).unwrap();
        assert!(!command.is_bomb(), "turn {turn}: bombed at {}", arena.agent);
        let blast = arena.apply(&command);
        assert!(!blast.contains(&arena.agent), "turn {turn}: caught at {}", arena.agent);
    }
    assert_eq!(arena.cell(Position::new(1, 0)), Some('0'));
}
