#[cfg(test)]
#[allow(clippy::module_inception)]
mod tests {
    use crate::{
        fold_case, page_offset, resolve_page_size, Error, PageInfo, PageLimits, SearchQuery, SortDir,
        SortKey,
    };

    #[test]
    fn test_page_info_empty_result_set() {
        let info = PageInfo::new(0, 10, 0);
        assert_eq!(info.total_pages, 0);
        assert!(info.first);
        assert!(info.last);
    }

    #[test]
    fn test_page_info_exact_multiple() {
        let info = PageInfo::new(1, 5, 10);
        assert_eq!(info.total_pages, 2);
        assert!(!info.first);
        assert!(info.last);
    }

    #[test]
    fn test_page_info_partial_last_page() {
        let info = PageInfo::new(0, 5, 11);
        assert_eq!(info.total_pages, 3);
        assert!(info.first);
        assert!(!info.last);

        let info = PageInfo::new(2, 5, 11);
        assert!(info.last);
    }

    #[test]
    fn test_page_info_beyond_last_page() {
        let info = PageInfo::new(7, 5, 11);
        assert_eq!(info.total_pages, 3);
        assert!(!info.first);
        assert!(info.last);
    }

    #[test]
    fn test_page_info_single_page() {
        let info = PageInfo::new(0, 50, 3);
        assert_eq!(info.total_pages, 1);
        assert!(info.first && info.last);
    }

    #[test]
    fn test_page_offset_saturates() {
        assert_eq!(page_offset(3, 20), 60);
        assert_eq!(page_offset(u64::MAX, 2), u64::MAX);
    }

    #[test]
    fn test_resolve_page_size() {
        let limits = PageLimits {
            default: 25,
            max: 100,
        };
        assert_eq!(resolve_page_size(None, limits), Ok(25));
        assert_eq!(resolve_page_size(Some(10), limits), Ok(10));
        assert_eq!(resolve_page_size(Some(1_000), limits), Ok(100));
        assert_eq!(resolve_page_size(Some(0), limits), Err(Error::InvalidPageSize));
    }

    #[test]
    fn test_sort_dir_parsing() {
        assert_eq!("asc".parse::<SortDir>(), Ok(SortDir::Asc));
        assert_eq!(" DESC ".parse::<SortDir>(), Ok(SortDir::Desc));
        assert_eq!("descending".parse::<SortDir>(), Ok(SortDir::Desc));
        assert_eq!(
            "sideways".parse::<SortDir>(),
            Err(Error::InvalidSortDirection("sideways".to_string()))
        );
    }

    #[test]
    fn test_search_query_builder() {
        let q = SearchQuery::new("Lisboa")
            .with_page(2, 10)
            .sorted_by("name", SortDir::Desc);
        assert_eq!(q.page, 2);
        assert_eq!(q.page_size, Some(10));
        assert_eq!(q.sort, Some(SortKey::new("name", SortDir::Desc)));
        assert_eq!(q.normalized_term(), "lisboa");
        assert!(!q.matches_everything());
        assert!(SearchQuery::all().matches_everything());
    }

    #[test]
    fn test_fold_case_handles_accented_letters() {
        assert_eq!(fold_case("ÉVORA"), "évora");
        assert_eq!(fold_case("Setúbal"), "setúbal");
        assert_eq!(fold_case("JOÃO"), fold_case("joão"));
        assert_eq!(SearchQuery::new("ÉVORA").normalized_term(), "évora");
    }

    #[test]
    fn test_page_info_serializes_flat_fields() {
        let json = serde_json::to_value(PageInfo::new(0, 10, 2)).unwrap();
        assert_eq!(json["total_elements"], 2);
        assert_eq!(json["total_pages"], 1);
        assert_eq!(json["first"], true);
        assert_eq!(json["last"], true);
    }
}
