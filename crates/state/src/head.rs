//! Document head metadata and the page collaborators that render it.

use serde::Serialize;

use product_context_catalog::{Product, Query};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

/// `<title>` and `<meta>` entries for a product page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HeadMetadata {
    pub title: Option<String>,
    pub meta: Vec<MetaTag>,
}

impl HeadMetadata {
    /// Title from `titleTag`; a `description` meta entry only when the product
    /// has a non-empty `metaTagDescription`.
    pub fn for_product(product: Option<&Product>) -> Self {
        let Some(product) = product else {
            return Self::default();
        };

        let meta = product
            .meta_tag_description
            .as_deref()
            .filter(|description| !description.is_empty())
            .map(|description| MetaTag {
                name: "description".to_string(),
                content: description.to_string(),
            })
            .into_iter()
            .collect();

        Self {
            title: product.title_tag.clone(),
            meta,
        }
    }
}

/// Document-level collaborators of a product page.
pub trait PageHead {
    /// Replace the document head metadata.
    fn set_head(&mut self, head: &HeadMetadata);

    /// Emit open-graph and structured-data markup. Only called with a product.
    fn render_product_markup(&mut self, _product: &Product, _query: &Query) {}
}

/// Records everything a page hands its head collaborator.
#[derive(Debug, Clone, Default)]
pub struct RecordingHead {
    pub heads: Vec<HeadMetadata>,
    pub markup: Vec<(Product, Query)>,
}

impl RecordingHead {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&HeadMetadata> {
        self.heads.last()
    }
}

impl PageHead for RecordingHead {
    fn set_head(&mut self, head: &HeadMetadata) {
        self.heads.push(head.clone());
    }

    fn render_product_markup(&mut self, product: &Product, query: &Query) {
        self.markup.push((product.clone(), query.clone()));
    }
}

impl<H> PageHead for &mut H
where
    H: PageHead + ?Sized,
{
    fn set_head(&mut self, head: &HeadMetadata) {
        (**self).set_head(head)
    }

    fn render_product_markup(&mut self, product: &Product, query: &Query) {
        (**self).render_product_markup(product, query)
    }
}
