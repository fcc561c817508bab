use bevy::prelude::*;

use super::viewport::Viewport;

/// Pointer position normalised to [-0.5, 0.5] on both axes, origin at the
/// viewport centre, y growing downwards like client coordinates.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
}

impl Cursor {
    pub fn from_client(position: Vec2, viewport: &Viewport) -> Option<Self> {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return None;
        }
        Some(Self {
            x: position.x / viewport.width - 0.5,
            y: position.y / viewport.height - 0.5,
        })
    }
}

pub fn track_cursor(
    mut cursor_moved: EventReader<CursorMoved>,
    viewport: Res<Viewport>,
    mut cursor: ResMut<Cursor>,
) {
    if let Some(moved) = cursor_moved.read().last() {
        if let Some(normalised) = Cursor::from_client(moved.position, &viewport) {
            *cursor = normalised;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(1000.0, 800.0, 1.0)
    }

    #[test]
    fn centre_maps_to_origin() {
        let cursor = Cursor::from_client(Vec2::new(500.0, 400.0), &viewport()).unwrap();
        assert_eq!(cursor, Cursor { x: 0.0, y: 0.0 });
    }

    #[test]
    fn corners_map_to_half_extents() {
        let top_left = Cursor::from_client(Vec2::ZERO, &viewport()).unwrap();
        assert_eq!(top_left, Cursor { x: -0.5, y: -0.5 });

        let bottom_right = Cursor::from_client(Vec2::new(1000.0, 800.0), &viewport()).unwrap();
        assert_eq!(bottom_right, Cursor { x: 0.5, y: 0.5 });
    }

    #[test]
    fn empty_viewport_is_ignored() {
        let empty = Viewport::new(0.0, 0.0, 1.0);
        assert!(Cursor::from_client(Vec2::new(10.0, 10.0), &empty).is_none());
    }

    #[test]
    fn system_keeps_the_latest_event() {
        let mut app = App::new();
        app.add_event::<CursorMoved>()
            .insert_resource(viewport())
            .init_resource::<Cursor>()
            .add_systems(Update, track_cursor);

        for position in [Vec2::new(0.0, 0.0), Vec2::new(1000.0, 800.0)] {
            app.world_mut().send_event(CursorMoved {
                window: Entity::PLACEHOLDER,
                position,
                delta: None,
            });
        }
        app.update();

        assert_eq!(*app.world().resource::<Cursor>(), Cursor { x: 0.5, y: 0.5 });
    }
}
