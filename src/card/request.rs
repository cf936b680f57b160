use crate::foundation::error::{CardError, CardResult};

/// Which compositing pipeline to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardVariant {
    /// Photo on top, gradient, logo, styled text and a source caption.
    Gradient,
    /// Full-bleed background with centered two-tone uppercase text.
    Title,
}

/// Fully resolved input for one card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardRequest {
    /// Encoded user photo. Required by [`CardVariant::Gradient`], ignored otherwise.
    pub photo: Option<Vec<u8>>,
    /// Raw template text, markup included.
    pub template: String,
    /// Source caption ("Photo: ..."). Used by [`CardVariant::Gradient`].
    pub caption: String,
    /// Pipeline to run.
    pub variant: CardVariant,
}

impl CardRequest {
    /// A photo card.
    pub fn gradient(
        photo: Vec<u8>,
        template: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        Self {
            photo: Some(photo),
            template: template.into(),
            caption: caption.into(),
            variant: CardVariant::Gradient,
        }
    }

    /// A text-only title card.
    pub fn title(template: impl Into<String>) -> Self {
        Self {
            photo: None,
            template: template.into(),
            caption: String::new(),
            variant: CardVariant::Title,
        }
    }
}

/// A finished card: PNG bytes plus the canvas size they decode to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedCard {
    /// Output width in pixels (same as the background asset).
    pub width: u32,
    /// Output height in pixels (same as the background asset).
    pub height: u32,
    /// Encoded PNG.
    pub png: Vec<u8>,
}

/// Per-conversation state collected over several chat turns.
///
/// A transport keeps one of these per chat and converts it into a [`CardRequest`] once the
/// last piece arrives. Nothing here is global.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversationDraft {
    /// Card kind chosen in the first step.
    pub variant: Option<CardVariant>,
    /// Photo bytes received from the user.
    pub photo: Option<Vec<u8>>,
    /// Template text.
    pub template: Option<String>,
    /// Source caption.
    pub caption: Option<String>,
}

impl ConversationDraft {
    /// Start a draft for `variant`.
    pub fn new(variant: CardVariant) -> Self {
        Self {
            variant: Some(variant),
            ..Self::default()
        }
    }

    /// The next piece of input this draft is waiting for, if any.
    pub fn next_step(&self) -> Option<DraftStep> {
        match self.variant {
            None => Some(DraftStep::Variant),
            Some(CardVariant::Gradient) => {
                if self.photo.is_none() {
                    Some(DraftStep::Photo)
                } else if self.template.is_none() {
                    Some(DraftStep::Template)
                } else if self.caption.is_none() {
                    Some(DraftStep::Caption)
                } else {
                    None
                }
            }
            Some(CardVariant::Title) => self.template.is_none().then_some(DraftStep::Template),
        }
    }

    /// True when every piece the chosen variant needs is present.
    pub fn is_complete(&self) -> bool {
        self.next_step().is_none()
    }

    /// Consume the draft into a request.
    pub fn into_request(self) -> CardResult<CardRequest> {
        if let Some(step) = self.next_step() {
            return Err(CardError::validation(format!(
                "conversation draft is missing its {}",
                step.label()
            )));
        }
        let variant = self
            .variant
            .ok_or_else(|| CardError::validation("conversation draft has no card variant"))?;
        Ok(CardRequest {
            photo: self.photo,
            template: self.template.unwrap_or_default(),
            caption: self.caption.unwrap_or_default(),
            variant,
        })
    }
}

/// Input steps of the chat flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftStep {
    /// Choose gradient or title card.
    Variant,
    /// Send the photo.
    Photo,
    /// Send the template text.
    Template,
    /// Send the source caption.
    Caption,
}

impl DraftStep {
    /// Short noun for messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Variant => "card variant",
            Self::Photo => "photo",
            Self::Template => "template text",
            Self::Caption => "source caption",
        }
    }

    /// User-facing prompt for this step.
    pub fn prompt(self, variant: Option<CardVariant>) -> String {
        match (self, variant) {
            (Self::Variant, _) => "Which card do you want to make? Main or Title?".to_string(),
            (Self::Photo, _) => "Send the image for the top half of the card.".to_string(),
            (Self::Template, Some(CardVariant::Title)) => format!(
                "Send the card text. Line breaks are kept; leave one empty line between the two \
                 paragraphs.\n{TITLE_EXAMPLE}"
            ),
            (Self::Template, _) => format!("{MARKUP_HELP}\n{MARKUP_EXAMPLE}"),
            (Self::Caption, _) => CAPTION_HELP.to_string(),
        }
    }
}

/// How to write a template for the gradient card.
pub const MARKUP_HELP: &str = "\
Write the card text.

Wrap the title in %%%.
Wrap bold text in %%.
Wrap italic text in %.
Description text is not wrapped.

Empty lines between paragraphs are kept in the final image.";

/// Ready-to-copy gradient card template.
pub const MARKUP_EXAMPLE: &str = "\
Example:
%%%Headline%%%

%%February 99 at 8:00%% %(A really great place)%
%%From $9.99%%

And this is a really great example of description text that you can copy and send to the bot! And here is one more sentence.

This paragraph gets extra space above it because there is an empty line between the two lines.";

/// Ready-to-copy title card template.
pub const TITLE_EXAMPLE: &str = "\
Example:
Dragon's Cave,
Labyrinths of Phaedra,
The Quiche Tavern

Where to go
this weekend
in the city?";

/// Prompt for the source caption.
pub const CAPTION_HELP: &str = "Enter the source caption, for example \"Photo: Channel One\".";

#[cfg(test)]
#[path = "../../tests/unit/card/request.rs"]
mod tests;
