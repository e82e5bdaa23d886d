use serde::{Deserialize, Serialize};

/// A workspace (Power BI "group") as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Body of the create-workspace call
#[derive(Debug, Clone, Serialize)]
pub struct CreateWorkspaceRequest {
    pub name: String,
    #[serde(rename = "capacityId", skip_serializing_if = "Option::is_none")]
    pub capacity_id: Option<String>,
}

impl CreateWorkspaceRequest {
    pub fn new(name: impl Into<String>, capacity_id: Option<String>) -> Self {
        Self {
            name: name.into(),
            capacity_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessRight {
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrincipalType {
    User,
}

/// Body of the add-workspace-user call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupUserRequest {
    pub identifier: String,
    pub group_user_access_right: AccessRight,
    pub principal_type: PrincipalType,
}

impl GroupUserRequest {
    pub fn admin(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            group_user_access_right: AccessRight::Admin,
            principal_type: PrincipalType::User,
        }
    }
}

/// OData collection envelope (`{"value": [...]}`)
#[derive(Debug, Clone, Deserialize)]
pub struct ODataList<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// Result of a delete call that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    /// The API answered 404
    AlreadyGone,
}
