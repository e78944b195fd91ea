use bevy::prelude::*;
use puzzle_helpers::input::just_pressed_world_position;

use board::Board;
use photo::{PhotoPlugin, PhotoValidation, PuzzlePhoto};

pub mod board;
mod photo;

const WINDOW_TITLE: &str = "CONNECT THE PYTHONISTAS";
const WINDOW_WIDTH: f32 = 906.0;
const WINDOW_HEIGHT: f32 = 450.0;

pub const GRID_DIMENSION: usize = 3;
// The third slice, row-major, stays out of the game
const REMOVED_TILE: usize = 2;

const BORDER_WIDTH: f32 = 1.0;
const BORDER_COLOR: Color = Color::BLACK;

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
enum GameState {
    #[default]
    Loading,
    Playing,
    Solved,
}

#[derive(Component)]
struct MainCamera;

#[derive(Component)]
struct TileSprite {
    slice: usize,
}

pub fn run() {
    puzzle_helpers::new_game_app(WINDOW_TITLE, WINDOW_WIDTH, WINDOW_HEIGHT)
        .add_plugins(PhotoPlugin)
        .init_state::<GameState>()
        .add_systems(Startup, setup_camera)
        .add_systems(OnEnter(GameState::Solved), reveal_photo)
        .add_systems(
            Update,
            (
                build_board.run_if(in_state(GameState::Loading)),
                (handle_clicks, sync_tile_sprites)
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            ),
        )
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d).insert(MainCamera);
}

fn build_board(
    mut commands: Commands,
    photo: Res<PuzzlePhoto>,
    validation: Res<PhotoValidation>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !photo::is_photo_ready(&validation) {
        return;
    }

    let tiles = board::slice_tiles(photo.size(), GRID_DIMENSION);
    let cells = board::scramble(tiles, REMOVED_TILE, &mut fastrand::Rng::new());
    let mut board = Board::new(cells, photo.tile_size(), photo.size(), GRID_DIMENSION);
    board.reposition();
    info!("scrambled board:\n{board}");

    spawn_tile_sprites(&mut commands, &board, &photo, &validation);
    commands.spawn(board);
    next_state.set(GameState::Playing);
}

fn spawn_tile_sprites(
    commands: &mut Commands,
    board: &Board,
    photo: &Res<PuzzlePhoto>,
    validation: &Res<PhotoValidation>,
) {
    let tile_size = board.tile_size();
    let board_size = board.board_size();
    for (_, tile) in board.tiles() {
        let translation = tile_translation(tile.pos(), tile_size, board_size);
        let Some(entity) =
            photo::spawn_tile_sprite(commands, photo, validation, tile.slice(), translation)
        else {
            continue;
        };
        commands
            .entity(entity)
            .insert(TileSprite {
                slice: tile.slice(),
            })
            .with_children(|parent| spawn_tile_border(parent, tile_size));
    }
}

// One hairline sprite per edge, laid over the tile's outermost pixels
fn spawn_tile_border(parent: &mut ChildBuilder, tile_size: UVec2) {
    let width = tile_size.x as f32;
    let height = tile_size.y as f32;
    let horizontal = Vec2::new(width, BORDER_WIDTH);
    let vertical = Vec2::new(BORDER_WIDTH, height);
    let edge_x = (width - BORDER_WIDTH) / 2.0;
    let edge_y = (height - BORDER_WIDTH) / 2.0;
    for (size, offset) in [
        (horizontal, Vec3::new(0.0, edge_y, 1.0)),
        (horizontal, Vec3::new(0.0, -edge_y, 1.0)),
        (vertical, Vec3::new(-edge_x, 0.0, 1.0)),
        (vertical, Vec3::new(edge_x, 0.0, 1.0)),
    ] {
        parent.spawn((
            Sprite::from_color(BORDER_COLOR, size),
            Transform::from_translation(offset),
        ));
    }
}

fn handle_clicks(
    window_query: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    mut board_query: Query<&mut Board>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(world_position) = just_pressed_world_position(
        &mouse_button_input,
        &touch_input,
        &window_query,
        &camera_query,
    ) else {
        return;
    };

    let Ok(mut board) = board_query.get_single_mut() else {
        error!("no board to click");
        return;
    };

    let point = world_to_board(world_position, board.board_size());
    let Some((row, col)) = board.hit_test(point) else {
        return;
    };

    if board.slide(row, col) && board.is_solved() {
        next_state.set(GameState::Solved);
    }
}

fn sync_tile_sprites(
    board_query: Query<&Board, Changed<Board>>,
    mut sprite_query: Query<(&TileSprite, &mut Transform)>,
) {
    let Ok(board) = board_query.get_single() else {
        return;
    };

    let tile_size = board.tile_size();
    let board_size = board.board_size();
    for (sprite, mut transform) in &mut sprite_query {
        if let Some(pos) = board.tile_position(sprite.slice) {
            transform.translation = tile_translation(pos, tile_size, board_size);
        }
    }
}

fn reveal_photo(
    mut commands: Commands,
    photo: Res<PuzzlePhoto>,
    tile_query: Query<Entity, With<TileSprite>>,
    board_query: Query<Entity, With<Board>>,
) {
    for entity in &tile_query {
        commands.entity(entity).despawn_recursive();
    }
    for entity in &board_query {
        commands.entity(entity).despawn();
    }
    commands.spawn(Sprite::from_image(photo.texture()));
    info!("puzzle solved");
}

// Board space puts the origin at the photo's top-left corner with y down;
// world space is centered on the photo with y up.
fn tile_translation(pos: IVec2, tile_size: UVec2, board_size: UVec2) -> Vec3 {
    Vec3::new(
        pos.x as f32 + tile_size.x as f32 / 2.0 - board_size.x as f32 / 2.0,
        board_size.y as f32 / 2.0 - pos.y as f32 - tile_size.y as f32 / 2.0,
        0.0,
    )
}

fn world_to_board(world: Vec2, board_size: UVec2) -> IVec2 {
    IVec2::new(
        (world.x + board_size.x as f32 / 2.0).floor() as i32,
        (board_size.y as f32 / 2.0 - world.y).floor() as i32,
    )
}
