// storefront/src/product_request.rs

//! Product requests: a customer asks for something not in the catalog,
//! attaching a photo or a PDF. Staff price it later, so it enters the cart
//! (or an order) as a quote-required line.

use crate::api::{AccountApi, ApiReply};
use crate::cache::{Mutation, QueryCache};
use crate::error::Result;
use crate::models::{Customer, OrderInfo};
use crate::notify::Notifier;
use crate::validation::ValidationErrors;
use std::fmt;
use std::sync::Arc;

pub const MAX_IMAGE_BYTES: usize = 1024 * 1024;
pub const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentType {
  Jpeg,
  Png,
  Pdf,
}

impl AttachmentType {
  pub fn from_mime(mime: &str) -> Option<Self> {
    match mime.trim().to_ascii_lowercase().as_str() {
      "image/jpeg" | "image/jpg" => Some(AttachmentType::Jpeg),
      "image/png" => Some(AttachmentType::Png),
      "application/pdf" => Some(AttachmentType::Pdf),
      _ => None,
    }
  }

  pub fn from_file_name(file_name: &str) -> Option<Self> {
    let (_, ext) = file_name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
      "jpg" | "jpeg" => Some(AttachmentType::Jpeg),
      "png" => Some(AttachmentType::Png),
      "pdf" => Some(AttachmentType::Pdf),
      _ => None,
    }
  }

  pub fn mime(self) -> &'static str {
    match self {
      AttachmentType::Jpeg => "image/jpeg",
      AttachmentType::Png => "image/png",
      AttachmentType::Pdf => "application/pdf",
    }
  }

  pub fn max_bytes(self) -> usize {
    match self {
      AttachmentType::Pdf => MAX_PDF_BYTES,
      AttachmentType::Jpeg | AttachmentType::Png => MAX_IMAGE_BYTES,
    }
  }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
  pub file_name: String,
  pub content_type: String,
  pub bytes: Vec<u8>,
}

impl Attachment {
  pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
    Attachment { file_name: file_name.into(), content_type: content_type.into(), bytes }
  }

  /// Guesses the content type from the extension; unknown extensions get
  /// `application/octet-stream` and fail validation.
  pub fn from_file_name(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
    let file_name = file_name.into();
    let content_type = AttachmentType::from_file_name(&file_name)
      .map(AttachmentType::mime)
      .unwrap_or("application/octet-stream")
      .to_string();
    Attachment { file_name, content_type, bytes }
  }

  pub fn kind(&self) -> Option<AttachmentType> {
    AttachmentType::from_mime(&self.content_type)
  }

  pub fn size(&self) -> usize {
    self.bytes.len()
  }
}

impl fmt::Debug for Attachment {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Attachment")
      .field("file_name", &self.file_name)
      .field("content_type", &self.content_type)
      .field("size", &self.bytes.len())
      .finish()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRequestForm {
  pub title: String,
  pub quantity: u32,
  pub phone: String,
  pub address: String,
  pub district: String,
  pub thana: String,
  pub description: Option<String>,
  pub attachment: Option<Attachment>,
}

impl ProductRequestForm {
  /// An empty request for one unit, with contact fields taken from the
  /// customer's profile.
  pub fn prefilled(customer: Option<&Customer>) -> Self {
    let contact = OrderInfo::prefilled(customer);
    ProductRequestForm {
      title: String::new(),
      quantity: 1,
      phone: contact.phone,
      address: contact.address,
      district: contact.district,
      thana: contact.thana,
      description: None,
      attachment: None,
    }
  }

  pub fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require_min_chars("title", &self.title, 2, "Product Name must be at least 2 characters.");
    if self.quantity == 0 {
      errors.add("quantity", "Quantity must be a positive integer.");
    }
    errors.require_phone("phone", &self.phone);
    errors.require_min_chars("address", &self.address, 10, "Delivery Address must be at least 10 characters.");
    errors.require_min_chars("district", &self.district, 3, "District must be at least 3 characters.");
    errors.require_min_chars("thana", &self.thana, 3, "Thana must be at least 3 characters.");

    match &self.attachment {
      None => errors.add("file", "Please attach an image or a PDF of the product."),
      Some(attachment) => match attachment.kind() {
        None => errors.add("file", "File must be an image (JPEG/PNG) or a PDF."),
        Some(kind) if attachment.size() > kind.max_bytes() => {
          errors.add("file", "File size exceeds the allowed limit.")
        }
        Some(_) => {}
      },
    }
    errors.into_result()
  }

  /// The description as sent: omitted when blank.
  pub fn description_field(&self) -> Option<&str> {
    self.description.as_deref().map(str::trim).filter(|d| !d.is_empty())
  }
}

/// What happens to the request once submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
  /// Becomes a product-request line in the cart.
  AddToCart,
  /// Becomes an order of its own, skipping the cart.
  OrderNow,
}

impl RequestAction {
  pub fn path(self) -> &'static str {
    match self {
      RequestAction::AddToCart => "/product-requests",
      RequestAction::OrderNow => "/product-requests/order-now",
    }
  }

  pub fn mutation(self) -> Mutation {
    match self {
      RequestAction::AddToCart => Mutation::ProductRequestAdded,
      RequestAction::OrderNow => Mutation::ProductRequestOrdered,
    }
  }
}

pub struct ProductRequestService {
  api: Arc<dyn AccountApi>,
  cache: QueryCache,
  notifier: Arc<dyn Notifier>,
}

impl ProductRequestService {
  pub fn new(api: Arc<dyn AccountApi>, cache: QueryCache, notifier: Arc<dyn Notifier>) -> Self {
    ProductRequestService { api, cache, notifier }
  }

  /// Validates and submits the form. Validation failures are returned
  /// without a notification, since they are shown next to the fields.
  pub async fn submit(&self, action: RequestAction, form: &ProductRequestForm) -> Result<ApiReply<()>> {
    form.validate()?;

    match self.api.submit_product_request(action, form).await {
      Ok(reply) => {
        self.cache.apply(action.mutation());
        self.notifier.success(reply.message_or("Product request submitted"));
        tracing::info!(?action, title = %form.title, "Product request submitted.");
        Ok(reply)
      }
      Err(err) => {
        tracing::error!(?action, error = %err, "Product request submission failed.");
        self.notifier.error(&err.user_message());
        Err(err)
      }
    }
  }
}
