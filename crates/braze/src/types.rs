//! Request and response types for the Braze REST API.
//!
//! Request bodies serialize with absent optional fields omitted, matching
//! the API's documented JSON. Response types decode leniently: unknown
//! fields are ignored and missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::attributes::{CustomAttribute, CustomAttributes};
use crate::error::{Error, Result};

// ---------- Response envelope ----------

/// Envelope returned by most Braze endpoints, on success and on documented
/// error statuses alike.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub send_id: Option<String>,
    /// Number of users removed by a delete request.
    #[serde(default)]
    pub deleted: u64,
    /// Minor per-item errors. The request as a whole still succeeded;
    /// callers decide whether to care.
    #[serde(default)]
    pub errors: Vec<MinorError>,
}

/// A non-fatal error attached to one item of a batch request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MinorError {
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
    /// Name of the request array the item belongs to, e.g. `attributes`.
    #[serde(default)]
    pub input_array: Option<String>,
    /// Zero-based index of the item within that array.
    #[serde(default)]
    pub index: u64,
}

// ---------- Profile objects ----------

/// Alternate user identifier.
///
/// <https://www.braze.com/docs/api/objects_filters/user_alias_object/>
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserAlias {
    pub alias_name: String,
    pub alias_label: String,
}

impl UserAlias {
    pub fn new(alias_name: impl Into<String>, alias_label: impl Into<String>) -> Self {
        Self {
            alias_name: alias_name.into(),
            alias_label: alias_label.into(),
        }
    }
}

/// Subscription states accepted for the email and push channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionState {
    /// Explicitly registered to receive messages.
    OptedIn,
    /// Explicitly opted out of messages.
    Unsubscribed,
    /// Neither opted in nor out.
    Subscribed,
}

/// Profile gender codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "O")]
    Other,
    #[serde(rename = "N")]
    NotApplicable,
    #[serde(rename = "P")]
    PreferNotToSay,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacebookProfile {
    pub id: String,
    pub likes: Vec<String>,
    pub num_friends: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TwitterProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friends_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses_count: Option<i64>,
}

/// A push token registration. When `device_id` is omitted Braze generates
/// one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PushToken {
    pub app_id: String,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

// ---------- User attributes ----------

/// A user profile update: the fixed attribute schema plus dynamically-keyed
/// custom attributes.
///
/// Custom attributes added through [`UserAttributes::add_attributes`] are
/// overlaid onto the typed fields when the value is serialized; on a name
/// collision the custom attribute wins. An update with no custom attributes
/// serializes exactly as the typed fields alone.
///
/// <https://www.braze.com/docs/api/objects_filters/user_attributes_object/>
#[derive(Debug, Clone, Default)]
pub struct UserAttributes {
    /// One of `external_id`, `user_alias` or `braze_id` identifies the user.
    pub external_id: Option<String>,
    pub user_alias: Option<UserAlias>,
    pub braze_id: Option<String>,
    /// When true the update only applies to already-existing users.
    pub update_existing_only: Option<bool>,
    pub push_token_import: Option<bool>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// ISO-3166-1 alpha-2 country code.
    pub country: Option<String>,
    pub email_subscribe: Option<SubscriptionState>,
    /// Disables the open-tracking pixel on future emails to this user.
    pub email_open_tracking_disabled: Option<bool>,
    /// Disables link click tracking on future emails to this user.
    pub email_click_tracking_disabled: Option<bool>,
    pub facebook: Option<FacebookProfile>,
    pub gender: Option<Gender>,
    pub home_city: Option<String>,
    /// URL of an image to associate with the profile.
    pub image_url: Option<String>,
    /// ISO-639-1 language code.
    pub language: Option<String>,
    /// ISO 8601 date at which the user's email was marked as spam.
    pub marked_email_as_spam_at: Option<String>,
    pub phone: Option<String>,
    pub push_subscribe: Option<SubscriptionState>,
    pub push_tokens: Option<Vec<PushToken>>,
    /// IANA time zone name, e.g. `America/New_York`.
    pub time_zone: Option<String>,
    pub twitter: Option<TwitterProfile>,
    /// Custom attribute overlay. Entries keep insertion order and win over
    /// typed fields on a name collision.
    pub custom_attributes: CustomAttributes,
}

/// Wire view of the fixed schema. The custom `Serialize` impl on
/// [`UserAttributes`] serializes this mirror instead of itself, so it
/// cannot recurse.
#[derive(Serialize)]
struct TypedFields<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    external_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_alias: Option<&'a UserAlias>,
    #[serde(skip_serializing_if = "Option::is_none")]
    braze_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    update_existing_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    push_token_import: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email_subscribe: Option<SubscriptionState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email_open_tracking_disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email_click_tracking_disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    facebook: Option<&'a FacebookProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    home_city: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    marked_email_as_spam_at: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    push_subscribe: Option<SubscriptionState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    push_tokens: Option<&'a [PushToken]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_zone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    twitter: Option<&'a TwitterProfile>,
}

impl UserAttributes {
    /// Append custom attributes to this update. Re-adding a name replaces
    /// the value while keeping the name's original position.
    pub fn add_attributes(&self, attributes: impl IntoIterator<Item = CustomAttribute>) {
        self.custom_attributes.add(attributes);
    }

    /// Build the merged wire document: the typed fields first, then the
    /// custom attributes in insertion order, the latter winning on
    /// collisions.
    pub fn to_document(&self) -> Result<Map<String, Value>> {
        let baseline = serde_json::to_value(self.typed_fields()).map_err(Error::Serialize)?;
        let Value::Object(mut doc) = baseline else {
            unreachable!("a struct serializes to a JSON object");
        };
        for (key, value) in self.custom_attributes.snapshot() {
            doc.insert(key, value);
        }
        Ok(doc)
    }

    fn typed_fields(&self) -> TypedFields<'_> {
        TypedFields {
            external_id: self.external_id.as_deref(),
            user_alias: self.user_alias.as_ref(),
            braze_id: self.braze_id.as_deref(),
            update_existing_only: self.update_existing_only,
            push_token_import: self.push_token_import,
            first_name: self.first_name.as_deref(),
            last_name: self.last_name.as_deref(),
            email: self.email.as_deref(),
            country: self.country.as_deref(),
            email_subscribe: self.email_subscribe,
            email_open_tracking_disabled: self.email_open_tracking_disabled,
            email_click_tracking_disabled: self.email_click_tracking_disabled,
            facebook: self.facebook.as_ref(),
            gender: self.gender,
            home_city: self.home_city.as_deref(),
            image_url: self.image_url.as_deref(),
            language: self.language.as_deref(),
            marked_email_as_spam_at: self.marked_email_as_spam_at.as_deref(),
            phone: self.phone.as_deref(),
            push_subscribe: self.push_subscribe,
            push_tokens: self.push_tokens.as_deref(),
            time_zone: self.time_zone.as_deref(),
            twitter: self.twitter.as_ref(),
        }
    }
}

impl Serialize for UserAttributes {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let doc = self.to_document().map_err(serde::ser::Error::custom)?;
        doc.serialize(serializer)
    }
}

// ---------- Events and purchases ----------

/// A custom event.
///
/// <https://www.braze.com/docs/api/objects_filters/event_object/>
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserEvent {
    /// One of `external_id`, `user_alias` or `braze_id` identifies the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_alias: Option<UserAlias>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub braze_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// Event name. Required.
    pub name: String,
    /// ISO 8601 datetime the event occurred. Required.
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
    /// When true (always the case with a `user_alias`) the event only
    /// applies to already-existing users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_existing_only: Option<bool>,
}

/// A purchase.
///
/// <https://www.braze.com/docs/api/objects_filters/purchase_object/>
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPurchase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_alias: Option<UserAlias>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub braze_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// Product identifier. Required.
    pub product_id: String,
    /// ISO 4217 currency code. Required.
    pub currency: String,
    /// Unit price in the given currency. Required.
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
    /// ISO 8601 datetime of the purchase. Required.
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
}

// ---------- Users requests ----------

/// Request body for `POST /users/track`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UsersTrackRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<UserAttributes>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<UserEvent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub purchases: Vec<UserPurchase>,
}

/// Request body for `POST /users/delete`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UsersDeleteRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_aliases: Vec<UserAlias>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub braze_ids: Vec<String>,
}

/// Request body for `POST /users/identify`. Not yet supported.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UsersIdentifyRequest {}

/// Request body for `POST /users/alias/new`. Not yet supported.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UsersCreateAliasRequest {}

/// Request body for `POST /users/merge`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UsersMergeRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub merge_updates: Vec<MergeUpdate>,
}

/// One merge instruction: the identified users are combined, `merge` into
/// `keep`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier_to_merge: Option<MergeIdentifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier_to_keep: Option<MergeIdentifier>,
}

/// Identifies one side of a merge. Braze accepts further identifier kinds;
/// extend as needed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeIdentifier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Request body for `POST /users/export/ids`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UsersExportIdsRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_aliases: Vec<UserAlias>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    /// Profile field names to include in the export; all when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields_to_export: Vec<String>,
}

/// Response from `POST /users/export/ids`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UsersExportIdsResponse {
    #[serde(default)]
    pub users: Vec<ExportedUser>,
    /// Requested identifiers that matched no profile.
    #[serde(default)]
    pub invalid_user_ids: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One exported profile. Only the commonly-used fields are modelled; the
/// remainder land in `custom_attributes` or are dropped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExportedUser {
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub braze_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub custom_attributes: Option<Map<String, Value>>,
}

// ---------- Messaging ----------

/// Request body for `POST /messages/send`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SendMessagesRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_user_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_aliases: Vec<UserAlias>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
    /// Must be set to true when messaging an entire segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<Recipient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Messages>,
}

/// Per-channel message payloads.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Messages {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android_push: Option<AndroidPushMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apple_push: Option<ApplePushMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailMessage>,
}

/// <https://www.braze.com/docs/api/objects_filters/messaging/android_object/>
#[derive(Debug, Clone, Default, Serialize)]
pub struct AndroidPushMessage {
    pub alert: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_variation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_to_sync: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapse_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_text: Option<String>,
    /// Seconds the message is kept for an offline device.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_live: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_icon_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_to_most_recent_device_only: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<AndroidPushActionButton>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conversation_data: Vec<AndroidPushConversationData>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AndroidPushActionButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_webview: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AndroidPushConversationData {
    pub shortcut_id: String,
    pub reply_person_id: String,
    pub messages: Vec<AndroidPushConversationMessage>,
    pub persons: Vec<AndroidPushConversationPerson>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AndroidPushConversationMessage {
    pub text: String,
    pub timestamp: i64,
    pub person_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AndroidPushConversationPerson {
    pub id: String,
    pub name: String,
}

/// <https://www.braze.com/docs/api/objects_filters/messaging/apple_object/>
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplePushMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<ApplePushAlert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
    #[serde(rename = "content-available", skip_serializing_if = "Option::is_none")]
    pub content_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interruption_level: Option<InterruptionLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_variation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_group_thread_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_file_type: Option<AssetFileType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapse_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutable_content: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_to_most_recent_device_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<ApplePushActionButton>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplePushAlert {
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_loc_key: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub title_loc_args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_loc_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc_key: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub loc_args: Vec<String>,
}

/// iOS interruption level for the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterruptionLevel {
    Passive,
    Active,
    TimeSensitive,
    Critical,
}

/// File type of a rich-notification asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetFileType {
    Aif,
    Gif,
    Jpg,
    M4a,
    Mp3,
    Mp4,
    Png,
    Wav,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplePushActionButton {
    pub action_id: String,
    pub action: String,
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_webview: Option<bool>,
}

/// <https://www.braze.com/docs/api/objects_filters/messaging/email_object/>
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmailMessage {
    pub app_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plaintext_body: Option<String>,
    #[serde(rename = "preheader", skip_serializing_if = "Option::is_none")]
    pub pre_header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_variation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_inline_css: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<EmailAttachment>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EmailAttachment {
    pub file_name: String,
    pub url: String,
}

/// Request body for `POST /campaigns/trigger/send`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TriggerCampaignRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub campaign_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_properties: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<Recipient>,
}

/// A targeted recipient of a triggered send.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Recipient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_alias: Option<UserAlias>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_properties: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas_entry_properties: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_to_existing_only: Option<bool>,
}

/// Request body for `POST /transactional/v1/campaigns/{campaign_id}/send`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionalSendRequest {
    /// Caller-chosen identifier for tracking the send.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_send_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_properties: Option<Map<String, Value>>,
    pub recipient: TransactionalRecipient,
}

/// Recipient of a transactional send, with optional profile updates applied
/// alongside the message.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionalRecipient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_alias: Option<UserAlias>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<UserAttributes>,
}

// ---------- Preference center ----------

/// Parameters for `POST /preference_center/v1/{id}/url/{user_id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PreferenceCenterUrlRequest {
    /// Identifier of the preference center. Part of the path.
    pub preference_center_id: String,
    /// External identifier of the user. Part of the path.
    pub user_id: String,
}

impl PreferenceCenterUrlRequest {
    pub fn new(preference_center_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            preference_center_id: preference_center_id.into(),
            user_id: user_id.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.preference_center_id.is_empty() {
            return Err(Error::InvalidRequest(
                "preference center ID must not be empty".to_string(),
            ));
        }
        if self.user_id.is_empty() {
            return Err(Error::InvalidRequest(
                "user ID must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Response from the preference center URL endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PreferenceCenterUrlResponse {
    /// Short-lived URL the user can open to manage their preferences.
    #[serde(default, rename = "preference_center_url")]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeAction;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn attributes_without_customs_serialize_as_typed_fields() {
        let attributes = UserAttributes {
            external_id: Some("123".to_string()),
            first_name: Some("Ada".to_string()),
            ..Default::default()
        };
        let encoded = serde_json::to_string(&attributes).unwrap();
        assert_eq!(encoded, r#"{"external_id":"123","first_name":"Ada"}"#);
        // Encoding is repeatable byte for byte.
        assert_eq!(serde_json::to_string(&attributes).unwrap(), encoded);
    }

    #[test]
    fn custom_attributes_append_after_typed_fields() {
        let attributes = UserAttributes {
            external_id: Some("123".to_string()),
            ..Default::default()
        };
        attributes.add_attributes([CustomAttribute::boolean("testing", true)]);

        let encoded = serde_json::to_string(&attributes).unwrap();
        assert_eq!(encoded, r#"{"external_id":"123","testing":true}"#);
    }

    #[test]
    fn custom_attribute_wins_on_name_collision() {
        let attributes = UserAttributes {
            external_id: Some("123".to_string()),
            email: Some("old@example.com".to_string()),
            ..Default::default()
        };
        attributes.add_attributes([CustomAttribute::string("email", "new@example.com")]);

        let doc = attributes.to_document().unwrap();
        let keys: Vec<&String> = doc.keys().collect();
        // The colliding key keeps its typed-field position.
        assert_eq!(keys, ["external_id", "email"]);
        assert_eq!(doc["email"], json!("new@example.com"));
    }

    #[test]
    fn custom_attributes_keep_insertion_order() {
        let attributes = UserAttributes::default();
        attributes.add_attributes([
            CustomAttribute::string("zeta", "z"),
            CustomAttribute::integer("alpha", 1),
        ]);
        attributes.add_attributes([CustomAttribute::modify_string_list(
            "roles",
            BTreeMap::from([(AttributeAction::Add, vec!["user".to_string()])]),
        )]);

        let encoded = serde_json::to_string(&attributes).unwrap();
        assert_eq!(encoded, r#"{"zeta":"z","alpha":1,"roles":{"add":["user"]}}"#);
    }

    #[test]
    fn subscription_and_gender_wire_values() {
        assert_eq!(json!(SubscriptionState::OptedIn), json!("opted_in"));
        assert_eq!(json!(SubscriptionState::Unsubscribed), json!("unsubscribed"));
        assert_eq!(json!(Gender::Female), json!("F"));
        assert_eq!(json!(Gender::PreferNotToSay), json!("P"));
    }

    #[test]
    fn apple_push_enum_wire_values() {
        assert_eq!(json!(InterruptionLevel::TimeSensitive), json!("time-sensitive"));
        assert_eq!(json!(AssetFileType::M4a), json!("m4a"));
    }

    #[test]
    fn track_request_omits_empty_arrays() {
        let request = UsersTrackRequest::default();
        assert_eq!(serde_json::to_string(&request).unwrap(), "{}");

        let request = UsersTrackRequest {
            events: vec![UserEvent {
                external_id: Some("123".to_string()),
                name: "signup".to_string(),
                time: "2020-07-20T10:30:00Z".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"events": [{"external_id": "123", "name": "signup", "time": "2020-07-20T10:30:00Z"}]})
        );
    }

    #[test]
    fn trigger_request_omits_an_unset_campaign_id() {
        let request = TriggerCampaignRequest::default();
        assert_eq!(serde_json::to_string(&request).unwrap(), "{}");

        let request = TriggerCampaignRequest {
            campaign_id: "camp-1".to_string(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"campaign_id":"camp-1"}"#
        );
    }

    #[test]
    fn content_available_uses_hyphenated_name() {
        let message = ApplePushMessage {
            content_available: Some(true),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"content-available": true})
        );
    }

    #[test]
    fn preference_center_request_validation() {
        assert!(PreferenceCenterUrlRequest::new("pc-1", "user-1")
            .validate()
            .is_ok());

        let missing_center = PreferenceCenterUrlRequest::new("", "user-1");
        assert!(matches!(
            missing_center.validate(),
            Err(Error::InvalidRequest(_))
        ));

        let missing_user = PreferenceCenterUrlRequest::new("pc-1", "");
        assert!(matches!(
            missing_user.validate(),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn export_response_decodes_with_defaults() {
        let response: UsersExportIdsResponse =
            serde_json::from_str(r#"{"users":[{"external_id":"123"}]}"#).unwrap();
        assert_eq!(
            response,
            UsersExportIdsResponse {
                users: vec![ExportedUser {
                    external_id: Some("123".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            }
        );
    }
}
