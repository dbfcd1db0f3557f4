//! `GraphHost` over a Cytoscape.js core object.
//!
//! Every query is a reflective call. A failing call is logged and replaced
//! by a neutral value so a misbehaving host never wedges the state machine.

use crate::js;
use js_sys::{Array, Object};
use lariat_core::host::GraphHost;
use lariat_core::id::NodeId;
use lariat_core::memory::DEFAULT_TAP_THRESHOLD_SQ;
use lariat_core::model::{BoxEvent, Rgb, SelectionBoxStyle, SelectionMode, ViewportSize};
use lariat_core::{Point, Vec2};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, MouseEvent};

pub struct CyHost {
    cy: JsValue,
    competing_selector: String,
    /// DOM event being dispatched, attached as `originalEvent` to
    /// `boxstart` / `boxend`.
    current_event: Option<MouseEvent>,
}

impl CyHost {
    pub fn new(cy: JsValue, competing_selector: String) -> Result<Self, String> {
        if !cy.is_object() {
            return Err("expected a Cytoscape core instance".to_string());
        }
        Ok(Self {
            cy,
            competing_selector,
            current_event: None,
        })
    }

    pub fn core(&self) -> &JsValue {
        &self.cy
    }

    pub fn container(&self) -> Result<HtmlElement, String> {
        js::call(&self.cy, "container", &[])?
            .dyn_into::<HtmlElement>()
            .map_err(|_| "Cytoscape core has no container".to_string())
    }

    pub fn set_current_event(&mut self, event: Option<MouseEvent>) {
        self.current_event = event;
    }

    // ─── Fallible primitives ─────────────────────────────────────────────

    fn renderer(&self) -> Result<JsValue, String> {
        js::call(&self.cy, "renderer", &[])
    }

    fn hover_data(&self) -> Result<JsValue, String> {
        js::get(&self.renderer()?, "hoverData")
    }

    fn element(&self, id: NodeId) -> Result<Option<JsValue>, String> {
        let ele = js::call(&self.cy, "getElementById", &[id.as_str().into()])?;
        Ok((!js::call_bool(&ele, "empty", &[])?).then_some(ele))
    }

    fn collection(&self, ids: &[NodeId]) -> Result<JsValue, String> {
        let collection = js::call(&self.cy, "collection", &[])?;
        for &id in ids {
            if let Some(ele) = self.element(id)? {
                js::call(&collection, "merge", &[ele])?;
            }
        }
        Ok(collection)
    }

    fn ids_of(collection: &JsValue) -> Result<Vec<NodeId>, String> {
        let elements = Array::from(&js::call(collection, "toArray", &[])?);
        elements
            .iter()
            .map(|ele| {
                js::call(&ele, "id", &[])?
                    .as_string()
                    .map(|id| NodeId::intern(&id))
                    .ok_or_else(|| "element id is not a string".to_string())
            })
            .collect()
    }

    fn set_all_selected(&self, ids: &[NodeId], selected: bool) -> Result<(), String> {
        if ids.is_empty() {
            return Ok(());
        }
        let method = if selected { "select" } else { "unselect" };
        js::call(&self.collection(ids)?, method, &[]).map(|_| ())
    }

    fn flag(&self, name: &str) -> bool {
        degrade(name, js::call_bool(&self.cy, name, &[]), false)
    }

    fn set_flag(&self, name: &str, value: bool) {
        degrade(name, js::call(&self.cy, name, &[value.into()]).map(|_| ()), ());
    }

    fn try_viewport_size(&self) -> Result<Option<ViewportSize>, String> {
        if js::call_bool(&self.cy, "destroyed", &[])? {
            return Ok(None);
        }
        Ok(Some(ViewportSize {
            width: js::call_f64(&self.cy, "width", &[])?,
            height: js::call_f64(&self.cy, "height", &[])?,
        }))
    }

    fn try_container_offset(&self) -> Result<Vec2, String> {
        let coords = js::numbers(&js::call(
            &self.renderer()?,
            "findContainerClientCoords",
            &[],
        )?);
        match coords[..] {
            [left, top, ..] => Ok(Vec2::new(left, top)),
            _ => Err("findContainerClientCoords returned no coordinates".to_string()),
        }
    }

    fn try_project(&self, device: Point) -> Result<Point, String> {
        let projected = js::numbers(&js::call(
            &self.renderer()?,
            "projectIntoViewport",
            &[device.x.into(), device.y.into()],
        )?);
        match projected[..] {
            [x, y, ..] => Ok(Point::new(x, y)),
            _ => Err("projectIntoViewport returned no coordinates".to_string()),
        }
    }

    fn try_node_position(&self, id: NodeId) -> Result<Option<Point>, String> {
        let Some(ele) = self.element(id)? else {
            return Ok(None);
        };
        let position = js::call(&ele, "position", &[])?;
        let x = js::get(&position, "x")?.as_f64();
        let y = js::get(&position, "y")?.as_f64();
        Ok(x.zip(y).map(|(x, y)| Point::new(x, y)))
    }

    fn element_flag(&self, id: NodeId, name: &str) -> Result<bool, String> {
        match self.element(id)? {
            Some(ele) => js::call_bool(&ele, name, &[]),
            None => Ok(false),
        }
    }

    fn try_competing(&self) -> Result<bool, String> {
        if self.competing_selector.is_empty() {
            return Ok(false);
        }
        let matched = js::call(&self.cy, "$", &[self.competing_selector.as_str().into()])?;
        Ok(js::get(&matched, "length")?.as_f64().unwrap_or(0.0) > 0.0)
    }

    /// The host is holding grabbed elements or is already dragging them.
    fn try_element_drag(&self) -> Result<bool, String> {
        let hover = self.hover_data()?;
        if js::get(&hover, "dragging")?.is_truthy() {
            return Ok(true);
        }
        let down = js::get(&hover, "down")?;
        if down.is_null() || down.is_undefined() {
            return Ok(false);
        }
        Ok(!js::call_bool(&down, "pannable", &[])?)
    }

    fn try_suppress_hint(&self) -> Result<(), String> {
        let renderer = self.renderer()?;
        js::set(&js::get(&renderer, "data")?, "bgActivePosistion", &JsValue::UNDEFINED)?;
        js::call(&renderer, "redrawHint", &["select".into(), true.into()]).map(|_| ())
    }

    fn try_emit(&self, event: &BoxEvent) -> Result<(), String> {
        match event {
            BoxEvent::Start { position, .. } | BoxEvent::End { position, .. } => {
                let payload = Object::new();
                js::set(&payload, "type", &event.name().into())?;
                if let Some(original) = &self.current_event {
                    js::set(&payload, "originalEvent", original)?;
                }
                let point = Object::new();
                js::set(&point, "x", &position.x.into())?;
                js::set(&point, "y", &position.y.into())?;
                js::set(&payload, "position", &point)?;
                js::call(&self.cy, "emit", &[payload.into()]).map(|_| ())
            }
            BoxEvent::Matched { nodes } | BoxEvent::Selected { nodes } => {
                let collection = self.collection(nodes)?;
                js::call(&collection, "emit", &[event.name().into()]).map(|_| ())
            }
        }
    }

    fn style_value(&self, property: &str) -> Result<JsValue, String> {
        let style = js::call(&self.cy, "style", &[])?;
        let token = js::call(&style, "core", &[property.into()])?;
        js::get(&token, "value")
    }

    fn try_style(&self) -> Result<SelectionBoxStyle, String> {
        let fallback = SelectionBoxStyle::default();
        let color = rgb_from(&js::numbers(&self.style_value("selection-box-color")?));
        let border = rgb_from(&js::numbers(
            &self.style_value("selection-box-border-color")?,
        ));
        Ok(SelectionBoxStyle {
            color: color.unwrap_or(fallback.color),
            border_color: border.unwrap_or(fallback.border_color),
            border_width: self
                .style_value("selection-box-border-width")?
                .as_f64()
                .unwrap_or(fallback.border_width),
            opacity: self
                .style_value("selection-box-opacity")?
                .as_f64()
                .unwrap_or(fallback.opacity),
        })
    }
}

impl GraphHost for CyHost {
    fn viewport_size(&self) -> Option<ViewportSize> {
        degrade("viewport", self.try_viewport_size(), None)
    }

    fn pixel_ratio(&self) -> f64 {
        let ratio = self
            .renderer()
            .and_then(|r| js::call_f64(&r, "getPixelRatio", &[]));
        degrade("getPixelRatio", ratio, 1.0)
    }

    fn container_offset(&self) -> Vec2 {
        degrade("findContainerClientCoords", self.try_container_offset(), Vec2::ZERO)
    }

    fn project_into_viewport(&self, device: Point) -> Point {
        degrade("projectIntoViewport", self.try_project(device), device)
    }

    fn node_ids(&self) -> Vec<NodeId> {
        let ids = js::call(&self.cy, "nodes", &[]).and_then(|nodes| Self::ids_of(&nodes));
        degrade("nodes", ids, Vec::new())
    }

    fn node_position(&self, id: NodeId) -> Option<Point> {
        degrade("position", self.try_node_position(id), None)
    }

    fn is_selectable(&self, id: NodeId) -> bool {
        degrade("selectable", self.element_flag(id, "selectable"), false)
    }

    fn is_selected(&self, id: NodeId) -> bool {
        degrade("selected", self.element_flag(id, "selected"), false)
    }

    fn selected_ids(&self) -> Vec<NodeId> {
        let ids = js::call(&self.cy, "$", &[":selected".into()])
            .and_then(|selected| Self::ids_of(&selected));
        degrade(":selected", ids, Vec::new())
    }

    fn select(&mut self, ids: &[NodeId]) {
        degrade("select", self.set_all_selected(ids, true), ());
    }

    fn unselect(&mut self, ids: &[NodeId]) {
        degrade("unselect", self.set_all_selected(ids, false), ());
    }

    fn selection_mode(&self) -> SelectionMode {
        let mode = js::call(&self.cy, "selectionType", &[]).map(|v| v.as_string());
        match degrade("selectionType", mode, None) {
            Some(name) => selection_mode_from(&name),
            None => SelectionMode::Single,
        }
    }

    fn auto_ungrabify(&self) -> bool {
        self.flag("autoungrabify")
    }

    fn set_auto_ungrabify(&mut self, value: bool) {
        self.set_flag("autoungrabify", value);
    }

    fn user_panning_enabled(&self) -> bool {
        self.flag("userPanningEnabled")
    }

    fn set_user_panning_enabled(&mut self, value: bool) {
        self.set_flag("userPanningEnabled", value);
    }

    fn box_selection_enabled(&self) -> bool {
        self.flag("boxSelectionEnabled")
    }

    fn set_box_selection_enabled(&mut self, value: bool) {
        self.set_flag("boxSelectionEnabled", value);
    }

    fn panning_enabled(&self) -> bool {
        self.flag("panningEnabled")
    }

    fn tap_threshold_sq(&self) -> f64 {
        let threshold = self
            .renderer()
            .and_then(|r| js::get(&r, "desktopTapThreshold2"))
            .map(|v| v.as_f64().unwrap_or(DEFAULT_TAP_THRESHOLD_SQ));
        degrade("desktopTapThreshold2", threshold, DEFAULT_TAP_THRESHOLD_SQ)
    }

    fn competing_mode_engaged(&self) -> bool {
        degrade("competing selector", self.try_competing(), false)
    }

    fn element_drag_in_progress(&self) -> bool {
        degrade("hoverData", self.try_element_drag(), false)
    }

    fn suppress_mousedown_hint(&mut self) {
        degrade("redrawHint", self.try_suppress_hint(), ());
    }

    fn request_redraw(&mut self) {
        let redraw = self
            .renderer()
            .and_then(|r| js::call(&r, "redraw", &[]))
            .map(|_| ());
        degrade("redraw", redraw, ());
    }

    fn mark_dragged(&mut self) {
        let marked = self
            .hover_data()
            .and_then(|hover| js::set(&hover, "dragged", &JsValue::TRUE));
        degrade("hoverData.dragged", marked, ());
    }

    fn emit(&mut self, event: BoxEvent) {
        degrade(event.name(), self.try_emit(&event), ());
    }

    fn selection_box_style(&self) -> SelectionBoxStyle {
        degrade("selection-box style", self.try_style(), SelectionBoxStyle::default())
    }
}

fn degrade<T>(what: &str, result: Result<T, String>, fallback: T) -> T {
    result.unwrap_or_else(|err| {
        log::warn!("host call `{what}` failed: {err}");
        fallback
    })
}

fn selection_mode_from(name: &str) -> SelectionMode {
    match name {
        "additive" => SelectionMode::Additive,
        _ => SelectionMode::Single,
    }
}

/// First three components as an 8-bit color.
fn rgb_from(components: &[f64]) -> Option<Rgb> {
    let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    match components {
        [r, g, b, ..] => Some(Rgb(channel(*r), channel(*g), channel(*b))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn selection_type_names() {
        assert_eq!(selection_mode_from("additive"), SelectionMode::Additive);
        assert_eq!(selection_mode_from("single"), SelectionMode::Single);
        assert_eq!(selection_mode_from(""), SelectionMode::Single);
    }

    #[test]
    fn style_colors_are_clamped_to_bytes() {
        assert_eq!(rgb_from(&[221.0, 221.0, 221.0]), Some(Rgb(221, 221, 221)));
        assert_eq!(rgb_from(&[-4.0, 300.0, 12.6, 1.0]), Some(Rgb(0, 255, 13)));
        assert_eq!(rgb_from(&[1.0, 2.0]), None);
    }

    #[test]
    fn degrade_falls_back_on_error() {
        assert_eq!(degrade("x", Ok(3), 0), 3);
        assert_eq!(degrade("x", Err("boom".to_string()), 7), 7);
    }
}
