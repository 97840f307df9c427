use crate::foundation::color::Rgba8;
use crate::foundation::core::{Point, Vec3};
use crate::scene::geometry::OrbitShape;
use crate::timeline::CameraPose;

/// Everything needed to draw one frame.
///
/// A scene is recreated from scratch for every frame and owns no references into the
/// configuration; backends treat it as read-only input.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Canvas fill color.
    pub background: Rgba8,
    /// Camera orientation.
    pub camera: CameraPose,
    /// Half-extent of the visible world cube (`[-e, e]` on every axis).
    pub world_extent: f64,
    /// 3D primitives in insertion order. Backends depth-sort them before drawing.
    pub items: Vec<Primitive>,
    /// Screen-space text drawn on top of the 3D content, in order.
    pub overlays: Vec<OverlayText>,
}

impl Scene {
    /// Empty scene with only a background and camera.
    pub fn new(background: Rgba8, camera: CameraPose, world_extent: f64) -> Self {
        Self {
            background,
            camera,
            world_extent,
            items: Vec::new(),
            overlays: Vec::new(),
        }
    }

    /// Append a primitive when it would be visible.
    ///
    /// Primitives with zero (or negative) opacity are dropped here so backends never see them.
    pub fn push(&mut self, item: impl Into<Primitive>) {
        let item = item.into();
        if item.opacity() > 0.0 {
            self.items.push(item);
        }
    }

    /// Iterate over all labels in the scene.
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.items.iter().filter_map(|p| match p {
            Primitive::Label(l) => Some(l),
            _ => None,
        })
    }

    /// Iterate over all spheres in the scene (glow halos included).
    pub fn spheres(&self) -> impl Iterator<Item = &Sphere> {
        self.items.iter().filter_map(|p| match p {
            Primitive::Sphere(s) => Some(s),
            _ => None,
        })
    }

    /// Iterate over all orbit curves in the scene.
    pub fn orbits(&self) -> impl Iterator<Item = &Orbit> {
        self.items.iter().filter_map(|p| match p {
            Primitive::Orbit(o) => Some(o),
            _ => None,
        })
    }

    /// Overlay with the given role, if present.
    pub fn overlay(&self, role: OverlayRole) -> Option<&OverlayText> {
        self.overlays.iter().find(|o| o.role == role)
    }
}

/// A drawable element placed in world space.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Tessellated sphere.
    Sphere(Sphere),
    /// Closed parametric curve.
    Orbit(Orbit),
    /// Straight line between two points.
    Segment(Segment),
    /// Text anchored at a world point.
    Label(Label),
}

impl Primitive {
    /// Opacity multiplier in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        match self {
            Self::Sphere(s) => s.opacity,
            Self::Orbit(o) => o.opacity,
            Self::Segment(s) => s.opacity,
            Self::Label(l) => l.opacity,
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(v: Sphere) -> Self {
        Self::Sphere(v)
    }
}

impl From<Orbit> for Primitive {
    fn from(v: Orbit) -> Self {
        Self::Orbit(v)
    }
}

impl From<Segment> for Primitive {
    fn from(v: Segment) -> Self {
        Self::Segment(v)
    }
}

impl From<Label> for Primitive {
    fn from(v: Label) -> Self {
        Self::Label(v)
    }
}

/// How a sphere surface is colored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shading {
    /// Single flat color with no lighting (glow halos).
    Unlit,
    /// Base color modulated by a directional light.
    Lit,
    /// White to base color to black ramp along the vertical axis.
    Gradient,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// A particle, nucleus, pudding or glow halo.
pub struct Sphere {
    /// World-space center.
    pub center: Vec3,
    /// Radius in world units.
    pub radius: f64,
    /// Base color.
    pub color: Rgba8,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Surface coloring.
    pub shading: Shading,
    /// Samples along each angular parameter.
    pub resolution: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// An orbit curve.
pub struct Orbit {
    /// Curve parameters.
    pub shape: OrbitShape,
    /// Stroke color.
    pub color: Rgba8,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Stroke width in points.
    pub width_pt: f64,
    /// Draw with a dashed pattern.
    pub dashed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// A straight stroke, used for the photon cue.
pub struct Segment {
    /// Start point.
    pub from: Vec3,
    /// End point.
    pub to: Vec3,
    /// Stroke color.
    pub color: Rgba8,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Stroke width in points.
    pub width_pt: f64,
}

#[derive(Clone, Debug, PartialEq)]
/// Text horizontally centered on a projected world point.
pub struct Label {
    /// Anchor position.
    pub position: Vec3,
    /// Text content.
    pub text: String,
    /// Text color.
    pub color: Rgba8,
    /// Font size in points.
    pub size_pt: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Role of a screen-space text block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayRole {
    /// Section heading.
    Title,
    /// Year line below the heading.
    Subtitle,
    /// Progressive description block near the bottom.
    Description,
}

#[derive(Clone, Debug, PartialEq)]
/// Text block positioned in normalized canvas coordinates.
pub struct OverlayText {
    /// What the block is.
    pub role: OverlayRole,
    /// Text content; may contain newlines.
    pub text: String,
    /// Text color.
    pub color: Rgba8,
    /// Font size in points.
    pub size_pt: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Center of the block in `[0, 1]²`, origin at the top-left corner.
    pub anchor: Point,
    /// Optional filled box behind the text.
    pub backdrop: Option<Backdrop>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Rectangle drawn behind an overlay.
pub struct Backdrop {
    /// Fill color (alpha included).
    pub color: Rgba8,
    /// Padding around the text in points.
    pub pad_pt: f64,
}
