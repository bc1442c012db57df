//! Plain-text dumps of the per-turn maps, for trace logging.

use crate::explosion::ExplosionForecast;
use crate::search::SearchField;
use crate::state::WorldState;

/// Grid symbols with the agents overlaid (`@` self, `A` others).
pub fn render_world(world: &WorldState) -> String {
    let mut lines: Vec<Vec<char>> = world
        .grid
        .render()
        .lines()
        .map(|line| line.chars().collect())
        .collect();

    let mut mark = |x: i32, y: i32, symbol: char| {
        if let Some(cell) = lines
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *cell = symbol;
        }
    };
    for agent in world.others.values() {
        mark(agent.position.x, agent.position.y, 'A');
    }
    mark(world.me.position.x, world.me.position.y, '@');

    lines
        .into_iter()
        .map(|line| line.into_iter().collect::<String>() + "\n")
        .collect()
}

pub fn render_explosions(forecast: &ExplosionForecast) -> String {
    forecast.times().render(3, |_, &time| {
        if time == 0 {
            ".".to_owned()
        } else {
            time.to_string()
        }
    })
}

pub fn render_distances(field: &SearchField) -> String {
    field.path_map().render(3, |_, entry| match entry {
        Some(entry) => entry.distance.to_string(),
        None => "#".to_owned(),
    })
}

pub fn render_safety(field: &SearchField) -> String {
    field.safety_map().render(3, |_, safety| safety.to_string())
}

pub fn render_utility(field: &SearchField) -> String {
    field.utility_map().render(3, |_, &utility| utility.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Agent, AgentId, Grid, Position};

    #[test]
    fn world_dump_marks_agents() {
        let mut world = WorldState::new(
            Grid::from_symbols(&["..0", "X.."]).unwrap(),
            Agent::new(AgentId(0), Position::new(1, 1), 1, 2),
        );
        world
            .others
            .insert(AgentId(3), Agent::new(AgentId(3), Position::ORIGIN, 1, 2));

        assert_eq!(render_world(&world), "A.0\nX@.\n");
    }

    #[test]
    fn distance_dump_marks_unreached() {
        let world = WorldState::new(
            Grid::from_symbols(&[".X."]).unwrap(),
            Agent::new(AgentId(0), Position::ORIGIN, 1, 2),
        );
        let forecast = ExplosionForecast::for_world(&world);
        let field = SearchField::for_agent(&world, &forecast);

        assert_eq!(render_distances(&field), "  0  #  #\n");
        assert_eq!(render_safety(&field), "  -  !  !\n");
        assert_eq!(render_explosions(&forecast), "  .  .  .\n");
    }
}
