use wasm_bindgen::prelude::Closure;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, HtmlImageElement, PointerEvent};

use annotboard_shared::{
    DecodeTicket, DecodeTickets, DisplaySize, PointerMode, Scene, SurfaceConfig, ToolState,
};

pub struct Background {
    pub image: HtmlImageElement,
    pub pixelated: HtmlCanvasElement,
    pub size: DisplaySize,
}

pub struct SurfaceListeners {
    pub down: Closure<dyn FnMut(PointerEvent)>,
    pub moved: Closure<dyn FnMut(PointerEvent)>,
    pub up: Closure<dyn FnMut(PointerEvent)>,
}

pub struct Surface {
    pub scene: Scene,
    pub background: Background,
    pub listeners: Option<SurfaceListeners>,
}

pub struct PendingDecode {
    pub ticket: DecodeTicket,
    pub url: String,
    pub image: HtmlImageElement,
    pub onload: Closure<dyn FnMut(Event)>,
    pub onerror: Closure<dyn FnMut(Event)>,
}

pub struct State {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub config: SurfaceConfig,
    pub debug: bool,
    pub tools: ToolState,
    pub pointer_mode: PointerMode,
    pub tickets: DecodeTickets,
    pub pending: Option<PendingDecode>,
    pub surface: Option<Surface>,
    pub active_pointer: Option<i32>,
}

impl State {
    pub fn scene(&self) -> Option<&Scene> {
        self.surface.as_ref().map(|surface| &surface.scene)
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.surface.as_mut().map(|surface| &mut surface.scene)
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }
}
