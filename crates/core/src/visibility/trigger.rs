use crate::core_types::Rect;
use serde::{Deserialize, Serialize};

/// How an element is observed
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserveOptions {
    /// Latch on the first intersection and ignore everything afterwards
    pub once: bool,
    /// Grows the viewport on every side before testing; negative values shrink it
    pub margin_px: f32,
}

impl ObserveOptions {
    #[must_use]
    pub fn once(margin_px: f32) -> Self {
        ObserveOptions {
            once: true,
            margin_px,
        }
    }

    #[must_use]
    pub fn repeat(margin_px: f32) -> Self {
        ObserveOptions {
            once: false,
            margin_px,
        }
    }
}

/// Visibility state of one observed element
///
/// State only changes inside [`VisibilityTrigger::evaluate`], which the observer
/// calls on scroll, resize and layout events.
#[derive(Debug, Clone)]
pub struct VisibilityTrigger {
    options: ObserveOptions,
    bounds: Option<Rect>,
    visible: bool,
    fired: bool,
}

impl VisibilityTrigger {
    #[must_use]
    pub fn new(bounds: Option<Rect>, options: ObserveOptions) -> Self {
        VisibilityTrigger {
            options,
            bounds,
            visible: false,
            fired: false,
        }
    }

    /// Re-test against `viewport`, returning the new state if it changed
    ///
    /// An element without bounds never intersects. A latched `once` trigger
    /// reports no further changes.
    pub fn evaluate(&mut self, viewport: Option<&Rect>) -> Option<bool> {
        if self.is_latched() {
            return None;
        }

        let hit = match (self.bounds.as_ref(), viewport) {
            (Some(bounds), Some(viewport)) => {
                bounds.intersects(&viewport.inflate(self.options.margin_px))
            }
            _ => false,
        };

        if hit == self.visible {
            return None;
        }
        self.visible = hit;
        self.fired |= hit;
        Some(hit)
    }

    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn options(&self) -> ObserveOptions {
        self.options
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Entered the viewport at least once
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// A fired `once` trigger; it is never evaluated again
    pub fn is_latched(&self) -> bool {
        self.options.once && self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport_at(scroll_y: f32) -> Rect {
        Rect::new(0.0, scroll_y, 1280.0, 800.0)
    }

    #[test]
    fn test_unmounted_element_is_never_visible() {
        let mut trigger = VisibilityTrigger::new(None, ObserveOptions::default());
        assert_eq!(trigger.evaluate(Some(&viewport_at(0.0))), None);
        assert!(!trigger.is_visible());
    }

    #[test]
    fn test_repeat_trigger_toggles() {
        let bounds = Rect::new(0.0, 1000.0, 1280.0, 300.0);
        let mut trigger = VisibilityTrigger::new(Some(bounds), ObserveOptions::default());

        assert_eq!(trigger.evaluate(Some(&viewport_at(0.0))), None);
        assert_eq!(trigger.evaluate(Some(&viewport_at(500.0))), Some(true));
        assert_eq!(trigger.evaluate(Some(&viewport_at(600.0))), None);
        assert_eq!(trigger.evaluate(Some(&viewport_at(0.0))), Some(false));
        assert!(trigger.has_fired());
    }

    #[test]
    fn test_once_trigger_latches() {
        let bounds = Rect::new(0.0, 1000.0, 1280.0, 300.0);
        let mut trigger = VisibilityTrigger::new(Some(bounds), ObserveOptions::once(0.0));

        assert_eq!(trigger.evaluate(Some(&viewport_at(500.0))), Some(true));
        assert!(trigger.is_latched());
        assert_eq!(trigger.evaluate(Some(&viewport_at(0.0))), None);
        assert!(trigger.is_visible());
    }

    #[test]
    fn test_negative_margin_delays_entry() {
        // Element top sits 50px above the viewport's bottom edge
        let bounds = Rect::new(0.0, 750.0, 1280.0, 300.0);
        let mut plain = VisibilityTrigger::new(Some(bounds), ObserveOptions::once(0.0));
        let mut inset = VisibilityTrigger::new(Some(bounds), ObserveOptions::once(-100.0));

        assert_eq!(plain.evaluate(Some(&viewport_at(0.0))), Some(true));
        assert_eq!(inset.evaluate(Some(&viewport_at(0.0))), None);
        assert_eq!(inset.evaluate(Some(&viewport_at(60.0))), Some(true));
    }

    #[test]
    fn test_bounds_arriving_later() {
        let mut trigger = VisibilityTrigger::new(None, ObserveOptions::default());
        let viewport = viewport_at(0.0);
        assert_eq!(trigger.evaluate(Some(&viewport)), None);
        trigger.set_bounds(Some(Rect::new(10.0, 10.0, 100.0, 100.0)));
        assert_eq!(trigger.evaluate(Some(&viewport)), Some(true));
    }
}
