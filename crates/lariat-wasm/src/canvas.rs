//! HTML canvas overlay backend.
//!
//! The lasso canvas is inserted directly in front of the host's own
//! selection-box layer and copies its inline style, so it stacks and scales
//! exactly like the host's layers.

use crate::js;
use kurbo::{BezPath, PathEl};
use lariat_core::model::Rgba;
use lariat_render::overlay::{SurfaceBackend, SurfaceSize};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, Node};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Create the overlay canvas inside `container`, in front of the canvas
    /// whose `data-id` is `anchor_layer_id`.
    pub fn attach(
        container: &HtmlElement,
        layer_id: &str,
        anchor_layer_id: &str,
    ) -> Result<Self, String> {
        let document = container
            .owner_document()
            .ok_or("graph container is not in a document")?;
        let anchor = container
            .query_selector(&layer_selector(anchor_layer_id))
            .map_err(|e| js::describe("querySelector", &e))?
            .ok_or_else(|| format!("no `{anchor_layer_id}` canvas in the graph container"))?;
        let parent = anchor
            .parent_node()
            .ok_or_else(|| format!("`{anchor_layer_id}` canvas has no parent"))?;

        let canvas = document
            .create_element("canvas")
            .map_err(|e| js::describe("createElement", &e))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| "created element is not a canvas".to_string())?;
        canvas
            .set_attribute("data-id", layer_id)
            .map_err(|e| js::describe("data-id", &e))?;
        if let Some(style) = anchor.get_attribute("style") {
            canvas
                .set_attribute("style", &style)
                .map_err(|e| js::describe("style", &e))?;
        }
        let anchor_node: &Node = &anchor;
        parent
            .insert_before(&canvas, Some(anchor_node))
            .map_err(|e| js::describe("insertBefore", &e))?;

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| js::describe("getContext", &e))?
            .ok_or("2d context unavailable")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "2d context has an unexpected type".to_string())?;

        log::debug!("lasso canvas `{layer_id}` inserted before `{anchor_layer_id}`");
        Ok(Self { canvas, ctx })
    }

    fn trace(&self, path: &BezPath) {
        self.ctx.begin_path();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => self.ctx.move_to(p.x, p.y),
                PathEl::LineTo(p) => self.ctx.line_to(p.x, p.y),
                PathEl::QuadTo(c, p) => self.ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
                PathEl::CurveTo(c1, c2, p) => {
                    self.ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y)
                }
                PathEl::ClosePath => self.ctx.close_path(),
            }
        }
    }
}

impl SurfaceBackend for CanvasSurface {
    fn set_size(&mut self, size: SurfaceSize) {
        self.canvas.set_width(size.device_width.round() as u32);
        self.canvas.set_height(size.device_height.round() as u32);
        let style = self.canvas.style();
        for (property, value) in [("width", size.css_width), ("height", size.css_height)] {
            if let Err(e) = style.set_property(property, &css_px(value)) {
                log::warn!("{}", js::describe(property, &e));
            }
        }
    }

    fn clear(&mut self, size: SurfaceSize) {
        self.ctx
            .clear_rect(0.0, 0.0, size.device_width, size.device_height);
    }

    fn stroke_path(&mut self, path: &BezPath, color: Rgba, width: f64) {
        self.trace(path);
        self.ctx.set_line_width(width);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.stroke();
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba) {
        self.trace(path);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn remove(&mut self) {
        self.canvas.remove();
        log::debug!("lasso canvas removed");
    }
}

fn layer_selector(layer_id: &str) -> String {
    format!("canvas[data-id=\"{layer_id}\"]")
}

fn css_px(value: f64) -> String {
    format!("{value}px")
}
