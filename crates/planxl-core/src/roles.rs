//! Default team role catalog

use serde::Serialize;

/// A team role with its display metadata
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Role {
    /// Role code as stored on team members
    pub name: &'static str,
    pub display_name: &'static str,
    /// Hex color used when rendering the role
    pub color: &'static str,
    pub description: &'static str,
}

const DEFAULT_ROLES: [Role; 8] = [
    Role {
        name: "pm",
        display_name: "项目经理(PM)",
        color: "#e74c3c",
        description: "负责项目整体规划和进度管理",
    },
    Role {
        name: "po",
        display_name: "产品经理(PO)",
        color: "#f39c12",
        description: "负责产品需求和功能设计",
    },
    Role {
        name: "frontend",
        display_name: "客户端程序",
        color: "#3498db",
        description: "负责前端界面和交互开发",
    },
    Role {
        name: "backend",
        display_name: "服务器程序",
        color: "#2ecc71",
        description: "负责后端服务和数据库开发",
    },
    Role {
        name: "ui",
        display_name: "UI设计师",
        color: "#9b59b6",
        description: "负责用户界面设计",
    },
    Role {
        name: "vfx",
        display_name: "特效师",
        color: "#1abc9c",
        description: "负责视觉特效制作",
    },
    Role {
        name: "audio",
        display_name: "音频师",
        color: "#34495e",
        description: "负责音效和音乐制作",
    },
    Role {
        name: "tester",
        display_name: "测试工程师",
        color: "#95a5a6",
        description: "负责功能测试和质量保证",
    },
];

/// The built-in roles, in catalog order
pub fn default_roles() -> &'static [Role] {
    &DEFAULT_ROLES
}

/// Find a role by code, ignoring ASCII case (`PM` and `pm` match)
pub fn find_role(code: &str) -> Option<&'static Role> {
    DEFAULT_ROLES.iter().find(|r| r.name.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_eight_unique_roles() {
        let roles = default_roles();
        assert_eq!(roles.len(), 8);
        for (i, role) in roles.iter().enumerate() {
            assert!(roles[i + 1..].iter().all(|other| other.name != role.name));
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(find_role("PM").map(|r| r.color), Some("#e74c3c"));
        assert_eq!(find_role("tester").map(|r| r.name), Some("tester"));
        assert!(find_role("producer").is_none());
    }
}
