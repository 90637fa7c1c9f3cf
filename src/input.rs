use crate::rules::Pattern;
use crate::scheduler::Scheduler;
use crate::simulation::{ResetMode, Simulation};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton},
    keyboard::{Key, NamedKey},
};

/// Everything the user can ask of the simulator, from the keyboard or the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Reset(ResetMode),
    Spawn(Pattern),
    TogglePause,
    /// Advance exactly one generation, typically while paused
    Step,
    ToggleMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Key bindings:
/// q / Esc -> quit, r -> randomize, 0 -> clear, a -> fill,
/// 1-9 -> spawn pattern, s / Space -> pause, . -> single step, m -> menu
///
/// Tab is left unbound: egui-winit always reports it as consumed for focus
/// navigation, so the event loop never forwards it here.
pub fn action_for_key(key: &Key) -> Option<Action> {
    match key {
        Key::Named(NamedKey::Escape) => Some(Action::Quit),
        Key::Named(NamedKey::Space) => Some(Action::TogglePause),
        Key::Character(text) => {
            let mut chars = text.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            match c.to_ascii_lowercase() {
                'q' => Some(Action::Quit),
                'r' => Some(Action::Reset(ResetMode::Random)),
                '0' => Some(Action::Reset(ResetMode::AllDead)),
                'a' => Some(Action::Reset(ResetMode::AllAlive)),
                's' => Some(Action::TogglePause),
                '.' => Some(Action::Step),
                'm' => Some(Action::ToggleMenu),
                digit => digit.to_digit(10).and_then(Pattern::from_digit).map(Action::Spawn),
            }
        }
        _ => None,
    }
}

/// Only fresh presses act; held keys would otherwise flicker the pause flag.
pub fn action_for_key_event(event: &KeyEvent) -> Option<Action> {
    if event.state != ElementState::Pressed || event.repeat {
        return None;
    }
    action_for_key(&event.logical_key)
}

impl Action {
    pub fn apply(self, simulation: &mut Simulation, scheduler: &mut Scheduler) -> Flow {
        match self {
            Action::Quit => {
                log::info!("Quit requested");
                return Flow::Exit;
            }
            Action::Reset(mode) => simulation.reset(mode),
            Action::Spawn(pattern) => {
                if let Err(e) = simulation.stamp_pattern(pattern) {
                    log::warn!("Ignoring spawn: {}", e);
                }
            }
            Action::TogglePause => scheduler.toggle_pause(),
            Action::Step => simulation.advance_generation(),
            Action::ToggleMenu => {}
        }
        Flow::Continue
    }
}

/// Mouse state for painting live cells with the left button
#[derive(Debug, Default)]
pub struct Painter {
    pub is_left_mouse_pressed: bool,
    pub cursor_pos: Option<PhysicalPosition<f64>>,
}

impl Painter {
    pub fn handle_mouse_input(&mut self, simulation: &mut Simulation, cell_size: u32, button: MouseButton, element_state: ElementState) {
        if button == MouseButton::Left {
            self.is_left_mouse_pressed = element_state == ElementState::Pressed;
            if self.is_left_mouse_pressed {
                if let Some(position) = self.cursor_pos {
                    paint_cell(simulation, cell_size, position);
                }
            }
        }
    }

    pub fn handle_cursor_move(&mut self, simulation: &mut Simulation, cell_size: u32, position: PhysicalPosition<f64>) {
        self.cursor_pos = Some(position);
        if self.is_left_mouse_pressed {
            paint_cell(simulation, cell_size, position);
        }
    }

    pub fn handle_cursor_left(&mut self) {
        self.cursor_pos = None;
    }
}

/// Grid `(row, col)` under a window position, if it lands on the grid.
pub fn cell_at(position: PhysicalPosition<f64>, cell_size: u32, rows: usize, cols: usize) -> Option<(usize, usize)> {
    if position.x < 0.0 || position.y < 0.0 || cell_size == 0 {
        return None;
    }
    let col = (position.x / f64::from(cell_size)).floor() as usize;
    let row = (position.y / f64::from(cell_size)).floor() as usize;
    (row < rows && col < cols).then_some((row, col))
}

fn paint_cell(simulation: &mut Simulation, cell_size: u32, position: PhysicalPosition<f64>) {
    let (rows, cols) = simulation.dimensions();
    if let Some((row, col)) = cell_at(position, cell_size, rows, cols) {
        if !simulation.is_alive(row, col) {
            simulation.set(row, col, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(text: &str) -> Key {
        Key::Character(text.into())
    }

    #[test]
    fn quit_keys() {
        assert_eq!(action_for_key(&key("q")), Some(Action::Quit));
        assert_eq!(action_for_key(&Key::Named(NamedKey::Escape)), Some(Action::Quit));
    }

    #[test]
    fn reset_keys() {
        assert_eq!(action_for_key(&key("r")), Some(Action::Reset(ResetMode::Random)));
        assert_eq!(action_for_key(&key("0")), Some(Action::Reset(ResetMode::AllDead)));
        assert_eq!(action_for_key(&key("a")), Some(Action::Reset(ResetMode::AllAlive)));
        assert_eq!(action_for_key(&key("R")), Some(Action::Reset(ResetMode::Random)));
    }

    #[test]
    fn digit_keys_spawn_patterns() {
        for digit in 1..=9u32 {
            let text = digit.to_string();
            let expected = Pattern::from_digit(digit).map(Action::Spawn);
            assert_eq!(action_for_key(&key(&text)), expected);
        }
        assert_eq!(action_for_key(&key("5")), Some(Action::Spawn(Pattern::Pentadecathlon)));
    }

    #[test]
    fn pause_step_and_menu_keys() {
        assert_eq!(action_for_key(&key("s")), Some(Action::TogglePause));
        assert_eq!(action_for_key(&Key::Named(NamedKey::Space)), Some(Action::TogglePause));
        assert_eq!(action_for_key(&key(".")), Some(Action::Step));
        assert_eq!(action_for_key(&key("m")), Some(Action::ToggleMenu));
        assert_eq!(action_for_key(&key("M")), Some(Action::ToggleMenu));
    }

    #[test]
    fn tab_is_left_to_egui() {
        assert_eq!(action_for_key(&Key::Named(NamedKey::Tab)), None);
    }

    #[test]
    fn unbound_keys_do_nothing() {
        assert_eq!(action_for_key(&key("x")), None);
        assert_eq!(action_for_key(&key("qq")), None);
        assert_eq!(action_for_key(&Key::Named(NamedKey::Enter)), None);
    }

    #[test]
    fn apply_drives_simulation_and_scheduler() {
        let mut sim = Simulation::with_seed(20, 20, 9);
        let mut scheduler = Scheduler::new(10);

        assert_eq!(Action::Reset(ResetMode::AllAlive).apply(&mut sim, &mut scheduler), Flow::Continue);
        assert_eq!(sim.population(), 400);

        Action::Reset(ResetMode::AllDead).apply(&mut sim, &mut scheduler);
        Action::Spawn(Pattern::Glider).apply(&mut sim, &mut scheduler);
        assert_eq!(sim.population(), 5);

        Action::TogglePause.apply(&mut sim, &mut scheduler);
        assert!(scheduler.is_paused());

        Action::Step.apply(&mut sim, &mut scheduler);
        assert_eq!(sim.generation(), 1);

        assert_eq!(Action::Quit.apply(&mut sim, &mut scheduler), Flow::Exit);
    }

    #[test]
    fn oversize_spawn_is_ignored() {
        let mut sim = Simulation::with_seed(5, 5, 9);
        let mut scheduler = Scheduler::new(10);
        assert_eq!(Action::Spawn(Pattern::GosperGliderGun).apply(&mut sim, &mut scheduler), Flow::Continue);
        assert_eq!(sim.population(), 0);
    }

    #[test]
    fn cell_under_cursor() {
        assert_eq!(cell_at(PhysicalPosition::new(13.0, 7.0), 6, 10, 10), Some((1, 2)));
        assert_eq!(cell_at(PhysicalPosition::new(61.0, 0.0), 6, 10, 10), None);
        assert_eq!(cell_at(PhysicalPosition::new(-1.0, 0.0), 6, 10, 10), None);
    }

    #[test]
    fn dragging_paints_cells() {
        let mut sim = Simulation::with_seed(10, 10, 1);
        let mut painter = Painter::default();
        painter.handle_cursor_move(&mut sim, 6, PhysicalPosition::new(1.0, 1.0));
        assert_eq!(sim.population(), 0);

        painter.handle_mouse_input(&mut sim, 6, MouseButton::Left, ElementState::Pressed);
        painter.handle_cursor_move(&mut sim, 6, PhysicalPosition::new(13.0, 1.0));
        assert!(sim.is_alive(0, 0));
        assert!(sim.is_alive(0, 2));

        painter.handle_mouse_input(&mut sim, 6, MouseButton::Left, ElementState::Released);
        painter.handle_cursor_move(&mut sim, 6, PhysicalPosition::new(30.0, 30.0));
        assert_eq!(sim.population(), 2);
    }
}
