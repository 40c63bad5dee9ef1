//! Annotation kit demo
//!
//! Orbits a camera around a cube with twelve labelled axes and reports which
//! labels survive LOD culling, then scripts a few slider interactions.
//!
//! Usage: `ak-demo [config.ron]`

use std::cell::RefCell;
use std::rc::Rc;

use ak_annotation::{AxisFollower, FollowedProp, Prop3DAxisFollower, QuadLabel};
use ak_core::{
    AnnotationConfig, AxisActor, AxisPosition, AxisType, BoundingBox, ConfigError, SceneViewport,
    Shared, SharedAxis, Viewport,
};
use ak_widgets::{PointerButton, PointerEvent, SliderEvent, SliderWidget, WidgetHost};
use glam::{DMat4, DVec2, DVec3};

const VIEWPORT_WIDTH: u32 = 800;
const VIEWPORT_HEIGHT: u32 = 600;
const ORBIT_STEPS: usize = 8;

fn main() -> Result<(), ConfigError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ak_demo=info,ak_annotation=debug,ak_widgets=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => AnnotationConfig::load(&path)?,
        None => AnnotationConfig::default(),
    };
    tracing::info!("Starting annotation demo");

    let mut viewport = SceneViewport::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
    if let Some(camera) = viewport.camera_mut() {
        config.camera.apply(camera);
        camera.look_at(DVec3::new(4.0, 3.0, 6.0), DVec3::ZERO, DVec3::Y);
    }
    let viewport = Rc::new(RefCell::new(viewport));

    run_followers(&config, &viewport);
    run_slider(&config, &viewport.borrow());
    Ok(())
}

/// Axes along the twelve edges of `bounds`.
fn cube_axes(bounds: &BoundingBox) -> Vec<SharedAxis> {
    let (lo, hi) = (bounds.min, bounds.max);
    let mut axes: Vec<SharedAxis> = Vec::new();
    for axis_type in AxisType::ALL {
        for position in AxisPosition::ALL {
            // Coordinates of the two remaining dimensions for this edge
            let (a, b) = match position {
                AxisPosition::MinMin => (0, 0),
                AxisPosition::MinMax => (0, 1),
                AxisPosition::MaxMax => (1, 1),
                AxisPosition::MaxMin => (1, 0),
            };
            let pick = |i: usize, side: usize| if side == 0 { lo[i] } else { hi[i] };
            let (p1, p2) = match axis_type {
                AxisType::X => (
                    DVec3::new(lo.x, pick(1, a), pick(2, b)),
                    DVec3::new(hi.x, pick(1, a), pick(2, b)),
                ),
                AxisType::Y => (
                    DVec3::new(pick(0, a), lo.y, pick(2, b)),
                    DVec3::new(pick(0, a), hi.y, pick(2, b)),
                ),
                AxisType::Z => (
                    DVec3::new(pick(0, a), pick(1, b), lo.z),
                    DVec3::new(pick(0, a), pick(1, b), hi.z),
                ),
            };
            let mut actor = AxisActor::new(p1, p2, axis_type, position);
            actor.set_bounds(Some(*bounds));
            axes.push(Rc::new(RefCell::new(actor)));
        }
    }
    axes
}

/// Title mesh positioned by a prop follower.
struct Title {
    local_center: DVec3,
    user_matrix: Option<DMat4>,
    visible: bool,
}

impl FollowedProp for Title {
    fn center(&self) -> DVec3 {
        self.user_matrix
            .map_or(self.local_center, |m| m.transform_point3(self.local_center))
    }

    fn user_matrix(&self) -> Option<DMat4> {
        self.user_matrix
    }

    fn set_user_matrix(&mut self, matrix: Option<DMat4>) {
        self.user_matrix = matrix;
    }

    fn set_visibility(&mut self, visible: bool) {
        self.visible = visible;
    }
}

fn run_followers(config: &AnnotationConfig, viewport: &Shared<SceneViewport>) {
    let bounds = BoundingBox::from_bounds([-1.0, 1.0, -1.0, 1.0, -1.0, 1.0]);
    let axes = cube_axes(&bounds);

    let mut labels: Vec<AxisFollower> = axes
        .iter()
        .map(|axis| {
            let mut label = AxisFollower::with_config(&config.follower);
            let mid = {
                let axis = axis.borrow();
                let viewport = viewport.borrow();
                match (axis.point1(&*viewport), axis.point2(&*viewport)) {
                    (Some(p1), Some(p2)) => (p1 + p2) * 0.5,
                    _ => DVec3::ZERO,
                }
            };
            label.set_axis(axis);
            label.set_position(mid);
            label.set_scale(DVec3::splat(0.1));
            label.set_geometry(Box::new(QuadLabel::new(3.0, 1.0)));
            label
        })
        .collect();

    let title = Rc::new(RefCell::new(Title {
        local_center: DVec3::new(0.0, -1.3, 1.0),
        user_matrix: None,
        visible: true,
    }));
    let mut title_follower = Prop3DAxisFollower::with_config(&config.prop_follower);
    title_follower.set_viewport(viewport);
    title_follower.set_prop(&title);
    title_follower.follower_mut().set_axis(&axes[0]);
    title_follower
        .follower_mut()
        .set_position(DVec3::new(0.0, -1.3, 1.0));

    for step in 0..ORBIT_STEPS {
        let drawn = {
            let viewport = viewport.borrow();
            labels
                .iter_mut()
                .map(|label| label.render_opaque_geometry(&*viewport))
                .filter(|drawn| *drawn)
                .count()
        };
        title_follower.compute_matrix();

        tracing::info!(
            "orbit step {step}: {drawn}/{} labels drawn, title visible {}",
            labels.len(),
            title.borrow().visible
        );
        for label in labels.iter().filter(|l| l.is_visible()) {
            let instance = label.label_instance();
            tracing::debug!("label at {:?}", instance.transform[3]);
        }

        if let Some(camera) = viewport.borrow_mut().camera_mut() {
            camera.orbit(std::f64::consts::FRAC_PI_4, 0.1);
        }
    }
}

/// Host that counts frames instead of drawing them.
struct DemoHost<'a> {
    viewport: &'a SceneViewport,
    frames: u32,
}

impl WidgetHost for DemoHost<'_> {
    fn is_in_viewport(&self, position: DVec2) -> bool {
        self.viewport.is_in_viewport(position)
    }

    fn render(&mut self) {
        self.frames += 1;
        tracing::trace!("frame {}", self.frames);
    }
}

fn run_slider(config: &AnnotationConfig, viewport: &SceneViewport) {
    let mut slider = SliderWidget::with_config(&config.slider);
    if !slider.representation_mut().place_widget(
        viewport,
        DVec3::new(-1.5, -1.5, 0.0),
        DVec3::new(1.5, -1.5, 0.0),
    ) {
        return;
    }
    slider.add_observer(|event| match event {
        SliderEvent::StartInteraction => tracing::info!("slider: start"),
        SliderEvent::Interaction { value } => tracing::info!("slider: value {value:.3}"),
        SliderEvent::EndInteraction => tracing::info!("slider: end"),
    });

    let mut host = DemoHost { viewport, frames: 0 };
    let rep = slider.representation();
    let (p1, p2) = (rep.point1(), rep.point2());
    let bead = rep.shapes().bead.center;
    let right_cap = rep.shapes().right_cap.center;

    // Drag the bead to the middle
    let script = [
        PointerEvent::press(PointerButton::Left, bead),
        PointerEvent::moved(p1.lerp(p2, 0.25)),
        PointerEvent::moved(p1.lerp(p2, 0.5)),
        PointerEvent::release(PointerButton::Left, p1.lerp(p2, 0.5)),
        // Click the tube near the left end
        PointerEvent::press(PointerButton::Left, p1.lerp(p2, 0.1)),
        PointerEvent::release(PointerButton::Left, p1.lerp(p2, 0.1)),
        // Click the right end cap
        PointerEvent::press(PointerButton::Left, right_cap),
        PointerEvent::release(PointerButton::Left, right_cap),
    ];
    for event in &script {
        slider.process_event(&mut host, event);
    }

    tracing::info!(
        "slider finished at {} after {} frames",
        slider.representation().label_text(),
        host.frames
    );
}
