#![forbid(unsafe_code)]

//! Named image with display-aware updates.

use weft_runtime::{Binding, SubscriptionGroup};
use weft_style::ImageAppearance;

use crate::node::Node;
use crate::view::{AppliedAppearance, Component, ReusableView};

/// An image, identified by name.
#[derive(Clone, Debug)]
pub struct Image {
    pub image: Binding<Option<String>>,
    pub appearance: ImageAppearance,
}

impl Image {
    pub fn named(name: impl Into<String>) -> Self {
        Self::bound(&Binding::constant(Some(name.into())))
    }

    pub fn bound(image: &Binding<Option<String>>) -> Self {
        Self {
            image: image.clone(),
            appearance: ImageAppearance::default(),
        }
    }

    #[must_use]
    pub fn appearance(mut self, appearance: ImageAppearance) -> Self {
        self.appearance = appearance;
        self
    }
}

impl Component for Image {
    type View = ImageView;
}

/// Live view for [`Image`].
///
/// Follows its binding while displayed. Between `did_end_display` and the
/// next `will_display` the subscription is dropped; on `will_display` it is
/// re-established, which replays the latest image name.
#[derive(Debug)]
pub struct ImageView {
    node: Node,
    image: Option<Binding<Option<String>>>,
    displaying: bool,
    subscriptions: SubscriptionGroup,
    appearance: AppliedAppearance<ImageAppearance>,
}

impl ImageView {
    #[must_use]
    pub fn is_displaying(&self) -> bool {
        self.displaying
    }

    fn observe(&mut self) {
        self.subscriptions.clear();
        if let Some(image) = &self.image {
            let node = self.node.clone();
            self.subscriptions
                .subscribe(image, move |name| node.set_image(name.clone()));
        }
    }
}

impl ReusableView for ImageView {
    type Component = Image;

    fn create() -> Self {
        Self {
            node: Node::new("Image"),
            image: None,
            displaying: true,
            subscriptions: SubscriptionGroup::new(),
            appearance: AppliedAppearance::default(),
        }
    }

    fn configure(&mut self, image: &Image) {
        self.appearance
            .apply(&self.node, &image.appearance, ImageAppearance::layout);
        self.image = Some(image.image.clone());
        if self.displaying {
            self.observe();
        } else {
            self.subscriptions.clear();
            self.node.set_image(image.image.get());
        }
    }

    fn prepare_for_reuse(&mut self) {
        self.subscriptions.clear();
        self.image = None;
    }

    fn will_display(&mut self) {
        if !self.displaying {
            self.displaying = true;
            self.observe();
        }
    }

    fn did_end_display(&mut self) {
        self.displaying = false;
        self.subscriptions.clear();
    }

    fn node(&self) -> &Node {
        &self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Property;

    #[test]
    fn offscreen_image_ignores_changes_until_shown() {
        let name = Binding::new(Some("cat".to_string()));
        let mut view = Image::bound(&name).materialize();
        assert_eq!(view.node().image().as_deref(), Some("cat"));

        view.did_end_display();
        assert!(!view.is_displaying());
        view.node().clear_writes();
        name.set(Some("dog".into()));
        assert!(view.node().writes().is_empty());

        view.will_display();
        assert_eq!(view.node().image().as_deref(), Some("dog"));
        assert_eq!(view.node().writes(), vec![Property::Image]);
    }

    #[test]
    fn configure_while_hidden_writes_current_image() {
        let mut view = Image::named("a").materialize();
        view.did_end_display();
        view.configure(&Image::named("b"));
        assert_eq!(view.node().image().as_deref(), Some("b"));
        assert!(view.subscriptions.is_empty());
    }
}
