use egui::{Event, Modifiers, PointerButton, Pos2, RawInput, Rect, Vec2, vec2};
use moodboard::element::{ElementId, Position, Size, factory};
use moodboard::panels::BoardSurface;
use moodboard::{BoardCommand, BoardConfig, ElementStore};

/// Runs the board inside a bare egui context and applies its commands after
/// every frame, the way the app does.
struct BoardHarness {
    ctx: egui::Context,
    board: BoardSurface,
    store: ElementStore,
    time: f64,
}

impl BoardHarness {
    fn with_image() -> (Self, ElementId) {
        let mut store = ElementStore::new();
        let id = store.add(factory::create_image("a.png").unwrap());
        let mut harness = Self {
            ctx: egui::Context::default(),
            board: BoardSurface::new(&BoardConfig::default()),
            store,
            time: 0.0,
        };
        // Lay the board out once so widgets exist for hit testing
        harness.frame(Vec::new());
        (harness, id)
    }

    fn frame(&mut self, events: Vec<Event>) -> Vec<BoardCommand> {
        self.time += 1.0 / 60.0;
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(1024.0, 768.0))),
            time: Some(self.time),
            events,
            ..Default::default()
        };

        let mut commands = Vec::new();
        let board = &mut self.board;
        let store = &self.store;
        let _ = self.ctx.run(input, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    commands = board.show(ui, store, false);
                });
        });

        for command in commands.clone() {
            command.execute(&mut self.store);
        }
        commands
    }

    /// Screen position of a board-local point.
    fn at(&self, x: f32, y: f32) -> Pos2 {
        self.board.mounted_rect().unwrap().min + vec2(x, y)
    }

    fn move_to(&mut self, pos: Pos2) -> Vec<BoardCommand> {
        self.frame(vec![Event::PointerMoved(pos)])
    }

    fn press(&mut self, pos: Pos2) -> Vec<BoardCommand> {
        self.frame(vec![button(pos, true)])
    }

    fn release(&mut self, pos: Pos2) -> Vec<BoardCommand> {
        self.frame(vec![Event::PointerMoved(pos), button(pos, false)])
    }

    fn size_of(&self, id: ElementId) -> Size {
        self.store.get(id).unwrap().size()
    }
}

fn button(pos: Pos2, pressed: bool) -> Event {
    Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed,
        modifiers: Modifiers::default(),
    }
}

#[test]
fn test_resize_handle_commits_every_move() {
    let (mut board, id) = BoardHarness::with_image();

    // Center of the 16px handle inside the (300, 300) corner
    let handle = board.at(292.0, 292.0);
    board.move_to(handle);
    board.press(handle);
    assert_eq!(board.board.gestures().state().name(), "Resizing");

    // Single slow moves, the kind egui does not yet count as "moving"
    board.move_to(handle + vec2(5.0, 5.0));
    assert_eq!(board.size_of(id), Size::new(205.0, 205.0));
    board.move_to(handle + vec2(10.0, 10.0));
    assert_eq!(board.size_of(id), Size::new(210.0, 210.0));

    // A frame without input commits nothing new
    assert!(board.frame(Vec::new()).is_empty());

    board.move_to(handle + vec2(30.0, 20.0));
    board.release(handle + vec2(30.0, 20.0));

    let element = board.store.get(id).unwrap();
    assert_eq!(element.size(), Size::new(230.0, 220.0));
    assert_eq!(element.position(), Position::new(100.0, 100.0));
    assert!(!board.board.gestures().is_active());
}

#[test]
fn test_resize_handle_respects_minimum() {
    let (mut board, id) = BoardHarness::with_image();

    let handle = board.at(292.0, 292.0);
    board.move_to(handle);
    board.press(handle);
    board.move_to(handle - vec2(400.0, 400.0));
    board.release(handle - vec2(400.0, 400.0));

    assert_eq!(board.size_of(id), Size::new(50.0, 50.0));
}

#[test]
fn test_body_drag_commits_on_release() {
    let (mut board, id) = BoardHarness::with_image();

    let grab = board.at(200.0, 200.0);
    board.move_to(grab);
    board.press(grab);
    assert_eq!(board.board.gestures().state().name(), "Dragging");

    board.move_to(grab + vec2(10.0, 0.0));
    board.move_to(grab + vec2(30.0, 20.0));
    // Still where it was until the pointer goes up
    assert_eq!(
        board.store.get(id).unwrap().position(),
        Position::new(100.0, 100.0)
    );
    assert_eq!(board.board.gestures().drag_preview(id), Some(Vec2::new(30.0, 20.0)));

    let commands = board.release(grab + vec2(30.0, 20.0));
    assert_eq!(commands.len(), 1);

    let element = board.store.get(id).unwrap();
    assert_eq!(element.position(), Position::new(130.0, 120.0));
    assert_eq!(element.size(), Size::new(200.0, 200.0));
}

#[test]
fn test_delete_button_removes_element() {
    let (mut board, id) = BoardHarness::with_image();

    // The button sits just inside the top-right corner at (300, 100)
    let delete = board.at(296.0, 104.0);
    board.move_to(delete);
    board.press(delete);
    assert!(!board.board.gestures().is_active());

    let commands = board.release(delete);
    assert_eq!(commands, vec![BoardCommand::Delete(id)]);
    assert!(board.store.is_empty());
}

#[test]
fn test_delete_button_overhang_is_clickable() {
    let (mut board, id) = BoardHarness::with_image();

    // Outside the element box, on the part of the button that overhangs it
    let overhang = board.at(305.0, 95.0);
    board.move_to(overhang);
    board.press(overhang);
    let commands = board.release(overhang);

    assert_eq!(commands, vec![BoardCommand::Delete(id)]);
    assert!(board.store.get(id).is_none());
}

#[test]
fn test_escape_cancels_a_drag() {
    let (mut board, id) = BoardHarness::with_image();

    let grab = board.at(150.0, 150.0);
    board.move_to(grab);
    board.press(grab);
    board.move_to(grab + vec2(40.0, 40.0));
    board.frame(vec![Event::Key {
        key: egui::Key::Escape,
        physical_key: None,
        pressed: true,
        repeat: false,
        modifiers: Modifiers::default(),
    }]);
    board.release(grab + vec2(40.0, 40.0));

    assert_eq!(
        board.store.get(id).unwrap().position(),
        Position::new(100.0, 100.0)
    );
}
