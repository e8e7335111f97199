use std::collections::HashMap;

use super::{ArticleQueryService, ListPostsQuery};
use crate::{
    application::{
        dto::{AdminArticleDto, ArticleDto, CategoryDto, CursorPage},
        error::ApplicationResult,
        ports::category::CategoryInfo,
    },
    domain::article::{CategoryId, StatusFilter},
};

/// Admin table listing. Unlike the public listing it covers every status unless narrowed.
#[derive(Debug, Clone, Default)]
pub struct ListAdminPostsQuery {
    pub listing: ListPostsQuery,
}

impl ArticleQueryService {
    pub async fn list_admin_posts(
        &self,
        query: ListAdminPostsQuery,
    ) -> ApplicationResult<CursorPage<AdminArticleDto>> {
        let page = self.fetch_page(query.listing, StatusFilter::Any).await?;

        // one lookup per distinct category on the page
        let mut categories: HashMap<CategoryId, Option<CategoryInfo>> = HashMap::new();
        let mut posts = Vec::with_capacity(page.articles.len());
        for article in page.articles {
            let info = match categories.get(&article.category_id) {
                Some(cached) => cached.clone(),
                None => {
                    let found = self.categories.find(&article.category_id).await?;
                    categories.insert(article.category_id.clone(), found.clone());
                    found
                }
            };
            let category = info.map(|info| CategoryDto::new(&article.category_id, info));
            posts.push(AdminArticleDto {
                post: ArticleDto::from(article),
                category,
            });
        }

        Ok(CursorPage::new(
            posts,
            page.next_cursor.map(|cursor| cursor.encode()),
        ))
    }
}
