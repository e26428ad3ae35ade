use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKEND_URL: &str = "/api/v1/pixel/serve";
pub const DEFAULT_BASE_FORMAT: &str = "jpeg";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Folder {
    #[default]
    Public,
    Private,
}

impl Folder {
    /// Anything other than `"private"` lands in the public folder.
    pub fn from_token(raw: &str) -> Self {
        if raw == "private" {
            Folder::Private
        } else {
            Folder::Public
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Folder::Public => "public",
            Folder::Private => "private",
        }
    }
}

impl From<&str> for Folder {
    fn from(raw: &str) -> Self {
        Self::from_token(raw)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Normal,
    Avatar,
}

impl Category {
    pub fn from_token(raw: &str) -> Self {
        if raw == "avatar" {
            Category::Avatar
        } else {
            Category::Normal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Normal => "normal",
            Category::Avatar => "avatar",
        }
    }

    pub fn is_avatar(self) -> bool {
        matches!(self, Category::Avatar)
    }
}

impl From<&str> for Category {
    fn from(raw: &str) -> Self {
        Self::from_token(raw)
    }
}

/// Everything needed to derive the candidate set for one image.
///
/// A request is never patched in place: a property change builds a new one
/// and the loader compares [`RequestIdentity`] values to decide whether a new
/// probe batch is due.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRequest {
    pub src: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<u32>,
    pub user_id: Option<String>,
    pub folder: Folder,
    pub category: Category,
    pub base_format: String,
    pub avif: bool,
    pub webp: bool,
    pub direct: bool,
    pub backend_url: String,
}

impl ImageRequest {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            width: None,
            height: None,
            quality: None,
            user_id: None,
            folder: Folder::default(),
            category: Category::default(),
            base_format: DEFAULT_BASE_FORMAT.to_string(),
            avif: true,
            webp: true,
            direct: false,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }

    pub fn with_size(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_quality(mut self, quality: Option<u32>) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_user_id(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_folder(mut self, folder: Folder) -> Self {
        self.folder = folder;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_base_format(mut self, format: impl Into<String>) -> Self {
        self.base_format = format.into();
        self
    }

    pub fn with_formats(mut self, avif: bool, webp: bool) -> Self {
        self.avif = avif;
        self.webp = webp;
        self
    }

    pub fn with_direct(mut self, direct: bool) -> Self {
        self.direct = direct;
        self
    }

    pub fn with_backend_url(mut self, backend_url: impl Into<String>) -> Self {
        self.backend_url = backend_url.into();
        self
    }

    pub fn identity(&self) -> RequestIdentity {
        RequestIdentity {
            src: self.src.clone(),
            width: self.width,
            height: self.height,
            quality: self.quality,
            base_format: self.base_format.clone(),
            avif: self.avif,
            webp: self.webp,
            direct: self.direct,
            folder: self.folder,
            category: self.category,
            user_id: self.user_id.clone(),
        }
    }
}

/// The fields whose change starts a new probe batch. `backend_url` is left out.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RequestIdentity {
    pub src: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<u32>,
    pub base_format: String,
    pub avif: bool,
    pub webp: bool,
    pub direct: bool,
    pub folder: Folder,
    pub category: Category,
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_normalizes_unknown_to_public() {
        assert_eq!(Folder::from_token("private"), Folder::Private);
        assert_eq!(Folder::from_token("Private"), Folder::Public);
        assert_eq!(Folder::from_token("shared"), Folder::Public);
        assert_eq!(Folder::Private.as_str(), "private");
    }

    #[test]
    fn category_normalizes_unknown_to_normal() {
        assert_eq!(Category::from_token("avatar"), Category::Avatar);
        assert_eq!(Category::from_token("banner"), Category::Normal);
        assert!(Category::Avatar.is_avatar());
    }

    #[test]
    fn identity_ignores_backend_url() {
        let a = ImageRequest::new("cat.jpg");
        let b = a.clone().with_backend_url("/other/serve");
        assert_eq!(a.identity(), b.identity());
        let c = a.clone().with_quality(Some(60));
        assert_ne!(a.identity(), c.identity());
    }
}
