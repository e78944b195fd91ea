use bevy::asset::LoadState;
use bevy::prelude::*;
use thiserror::Error;

use crate::GRID_DIMENSION;

const PHOTO_PATH: &str = "bg.png";

/// Loads the background photo and cuts it into the atlas grid the tile
/// sprites render from.
pub struct PhotoPlugin;

impl Plugin for PhotoPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PhotoValidation>()
            .add_systems(Startup, setup_photo)
            .add_systems(Update, slice_photo);
    }
}

#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("failed to load puzzle photo `{0}`")]
    LoadFailed(&'static str),

    #[error("photo is too small to slice - {width}x{height} cannot hold a {n}x{n} grid")]
    TooSmall { width: u32, height: u32, n: usize },
}

#[derive(Resource)]
pub struct PuzzlePhoto {
    texture: Handle<Image>,
    layout: Handle<TextureAtlasLayout>,
    size: UVec2,
    tile_size: UVec2,
}

impl PuzzlePhoto {
    pub fn texture(&self) -> Handle<Image> {
        self.texture.clone()
    }

    pub const fn size(&self) -> UVec2 {
        self.size
    }

    pub const fn tile_size(&self) -> UVec2 {
        self.tile_size
    }
}

#[derive(Resource, Default)]
pub struct PhotoValidation {
    is_sliced: bool,
}

fn setup_photo(mut commands: Commands, asset_server: Res<AssetServer>) {
    let texture = asset_server.load(PHOTO_PATH);
    commands.insert_resource(PuzzlePhoto {
        texture,
        layout: Handle::default(),
        size: UVec2::ZERO,
        tile_size: UVec2::ZERO,
    });
}

// The photo's dimensions are unknown until the asset decodes, so the atlas
// grid is built here rather than at startup. A missing or corrupt photo is
// fatal: the game cannot run without its one asset.
fn slice_photo(
    mut photo: ResMut<PuzzlePhoto>,
    mut validation: ResMut<PhotoValidation>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    images: Res<Assets<Image>>,
    asset_server: Res<AssetServer>,
    mut app_exit: EventWriter<AppExit>,
) {
    if validation.is_sliced {
        return;
    }

    if matches!(
        asset_server.load_state(photo.texture.id()),
        LoadState::Failed(_)
    ) {
        error!("{}", PhotoError::LoadFailed(PHOTO_PATH));
        app_exit.send(AppExit::error());
        return;
    }

    let Some(image) = images.get(&photo.texture) else {
        return;
    };

    let size = image.size();
    let tile_size = size / GRID_DIMENSION as u32;
    if tile_size.x == 0 || tile_size.y == 0 {
        error!(
            "{}",
            PhotoError::TooSmall {
                width: size.x,
                height: size.y,
                n: GRID_DIMENSION,
            }
        );
        app_exit.send(AppExit::error());
        return;
    }

    // Atlas cells cover tile_size * n pixels; remainder pixels of a photo
    // that does not divide evenly are never referenced.
    let layout = TextureAtlasLayout::from_grid(
        tile_size,
        GRID_DIMENSION as u32,
        GRID_DIMENSION as u32,
        None,
        None,
    );
    photo.layout = layouts.add(layout);
    photo.size = size;
    photo.tile_size = tile_size;
    validation.is_sliced = true;
    info!(
        "photo sliced: {}x{} into {} tiles of {}x{}",
        size.x,
        size.y,
        GRID_DIMENSION * GRID_DIMENSION,
        tile_size.x,
        tile_size.y
    );
}

/// Returns whether the photo has been decoded and sliced.
#[must_use]
pub fn is_photo_ready(validation: &Res<PhotoValidation>) -> bool {
    validation.is_sliced
}

/// Spawns a sprite showing atlas cell `slice` of the photo.
pub fn spawn_tile_sprite(
    commands: &mut Commands,
    photo: &Res<PuzzlePhoto>,
    validation: &Res<PhotoValidation>,
    slice: usize,
    translation: Vec3,
) -> Option<Entity> {
    if !validation.is_sliced {
        return None;
    }

    Some(
        commands
            .spawn((
                Sprite {
                    image: photo.texture.clone(),
                    texture_atlas: Some(TextureAtlas {
                        layout: photo.layout.clone(),
                        index: slice,
                    }),
                    ..default()
                },
                Transform::from_translation(translation),
            ))
            .id(),
    )
}
