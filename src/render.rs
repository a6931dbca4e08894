use crate::{CategoryKey, EntityId, QueryBuilder, QueryError, QueryResult};
use html_escape::encode_text;
use url::Url;

/// Name of the host page function a category button calls.
pub const FOLLOW_UP_HANDLER: &str = "getCommentarii";

/// A clickable entity of a category listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryButton {
    entity_id: EntityId,
    label: String,
    key: CategoryKey,
}

impl CategoryButton {
    pub fn new<S: Into<String>>(entity_id: EntityId, label: S, key: CategoryKey) -> Self {
        Self {
            entity_id,
            label: label.into(),
            key,
        }
    }

    pub const fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub const fn key(&self) -> CategoryKey {
        self.key
    }

    /// The arguments the click handler passes to the follow-up query.
    pub fn follow_up(&self) -> (&EntityId, CategoryKey) {
        (&self.entity_id, self.key)
    }

    /// The URL the click handler ends up requesting.
    pub fn follow_up_url(&self, builder: &QueryBuilder) -> Url {
        builder.commentaries_url(&self.entity_id, self.key)
    }

    /// The inline `onclick` script.
    pub fn onclick(&self) -> String {
        format!(
            "{FOLLOW_UP_HANDLER}(\"{}\", \"{}\")",
            self.entity_id,
            self.key.as_str()
        )
    }

    pub fn to_html(&self) -> String {
        format!(
            "<button onclick='{}'>{}</button>",
            self.onclick(),
            encode_text(&self.label)
        )
    }
}

/// The rendered content of the `keywords` container.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryListing {
    buttons: Vec<CategoryButton>,
}

impl CategoryListing {
    pub fn buttons(&self) -> &[CategoryButton] {
        &self.buttons
    }

    pub fn to_html(&self) -> String {
        let inner: String = self.buttons.iter().map(CategoryButton::to_html).collect();
        format!("<div>{inner}</div>")
    }
}

/// A non-interactive commentary block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentaryBlock {
    label: String,
    entity_id: Option<EntityId>,
}

impl CommentaryBlock {
    pub fn new<S: Into<String>>(label: S, entity_id: Option<EntityId>) -> Self {
        Self {
            label: label.into(),
            entity_id,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub const fn entity_id(&self) -> Option<&EntityId> {
        self.entity_id.as_ref()
    }

    pub fn to_html(&self) -> String {
        let label = encode_text(&self.label);
        match &self.entity_id {
            Some(id) => format!("<div data-entity=\"{id}\">{label}</div>"),
            None => format!("<div>{label}</div>"),
        }
    }
}

/// The rendered content of the `commentarii` container.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentaryListing {
    blocks: Vec<CommentaryBlock>,
}

impl CommentaryListing {
    pub fn blocks(&self) -> &[CommentaryBlock] {
        &self.blocks
    }

    pub fn to_html(&self) -> String {
        let inner: String = self.blocks.iter().map(CommentaryBlock::to_html).collect();
        format!("<div>{inner}</div>")
    }
}

/// Builds one button per binding, in server order.
/// # Errors
/// Fails on the first binding without a label or without an entity ID; nothing is rendered then.
pub fn render_categories(
    result: &QueryResult,
    key: CategoryKey,
) -> Result<CategoryListing, QueryError> {
    let buttons = result
        .bindings()
        .iter()
        .enumerate()
        .map(|(index, binding)| -> Result<CategoryButton, QueryError> {
            let entity_id = binding.entity_id_at(index)?;
            let label = binding.label_at(index)?;
            Ok(CategoryButton::new(entity_id, label, key))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CategoryListing { buttons })
}

/// Builds one block per binding, in server order.
/// # Errors
/// Fails on the first binding without a label.
pub fn render_commentarii(result: &QueryResult) -> Result<CommentaryListing, QueryError> {
    let blocks = result
        .bindings()
        .iter()
        .enumerate()
        .map(|(index, binding)| -> Result<CommentaryBlock, QueryError> {
            let label = binding.label_at(index)?;
            // Commentaries without an item URI are still shown
            let entity_id = binding.entity_id_at(index).ok();
            Ok(CommentaryBlock::new(label, entity_id))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CommentaryListing { blocks })
}
