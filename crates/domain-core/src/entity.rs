//! 实体基础 trait

/// 实体 trait
///
/// 标识由存储在首次保存时分配，瞬时（未持久化）实体没有标识。
pub trait Entity {
    type Id: PartialEq;

    fn id(&self) -> Option<&Self::Id>;

    /// 是否尚未持久化
    fn is_new(&self) -> bool {
        self.id().is_none()
    }

    /// 按标识判等：双方都有标识且相同才相等，无标识的实体不等于任何实体
    fn same_identity(&self, other: &Self) -> bool {
        matches!((self.id(), other.id()), (Some(a), Some(b)) if a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        id: Option<u32>,
    }

    impl Entity for Row {
        type Id = u32;

        fn id(&self) -> Option<&u32> {
            self.id.as_ref()
        }
    }

    #[test]
    fn test_same_identity() {
        let a = Row { id: Some(1) };
        let b = Row { id: Some(1) };
        let c = Row { id: Some(2) };
        let transient = Row { id: None };

        assert!(a.same_identity(&b));
        assert!(!a.same_identity(&c));
        assert!(!transient.same_identity(&a));
        assert!(!transient.same_identity(&Row { id: None }));
        assert!(!transient.same_identity(&transient));
        assert!(transient.is_new());
        assert!(!a.is_new());
    }
}
