use maud::{html, Markup};

use crate::feed::PostRecord;

pub const GRID_ID: &str = "writing-grid";
pub const STATUS_ID: &str = "writing-status";

pub const LOADING_TEXT: &str = "Loading posts...";
pub const ERROR_TEXT: &str = "Couldn’t load posts right now.";
pub const CTA_TEXT: &str = "View on Substack";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tile {
  Skeleton,
  Post(PostRecord),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
  #[default]
  Idle,
  Loading,
  /// Inline error notice with a link out to the feed owner's page.
  Failed { profile_url: String },
}

/// The writing section of the page: a grid of tiles and a status line.
///
/// A panel is owned by a single load; the loader mutates it in place and
/// the caller renders whatever state it ends up in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panel {
  grid: Vec<Tile>,
  status: Status,
}

impl Panel {
  pub fn new() -> Self {
    Self::default()
  }

  #[cfg(test)]
  pub fn tiles(&self) -> &[Tile] {
    &self.grid
  }

  #[cfg(test)]
  pub fn status(&self) -> &Status {
    &self.status
  }

  pub fn posts(&self) -> impl Iterator<Item = &PostRecord> {
    self.grid.iter().filter_map(|tile| match tile {
      Tile::Post(post) => Some(post),
      Tile::Skeleton => None,
    })
  }

  #[cfg(test)]
  pub fn skeleton_count(&self) -> usize {
    self
      .grid
      .iter()
      .filter(|tile| matches!(tile, Tile::Skeleton))
      .count()
  }

  pub fn show_loading(&mut self, skeletons: usize) {
    self.grid.clear();
    self.grid.extend(std::iter::repeat_n(Tile::Skeleton, skeletons));
    self.status = Status::Loading;
  }

  pub fn show_posts(&mut self, posts: Vec<PostRecord>) {
    self.status = Status::Idle;
    self.grid.clear();
    self.grid.extend(posts.into_iter().map(Tile::Post));
  }

  pub fn show_error(&mut self, fallback: PostRecord, profile_url: &str) {
    self.status = Status::Failed {
      profile_url: profile_url.to_owned(),
    };
    self.grid.clear();
    self.grid.push(Tile::Post(fallback));
  }

  pub fn render(&self) -> Markup {
    html! {
      div #(STATUS_ID) .writing-status {
        (status_fragment(&self.status))
      }
      div #(GRID_ID) .writing-grid {
        @for tile in &self.grid {
          (tile_fragment(tile))
        }
      }
    }
  }
}

fn status_fragment(status: &Status) -> Markup {
  html! {
    @match status {
      Status::Idle => {},
      Status::Loading => { (LOADING_TEXT) },
      Status::Failed { profile_url } => {
        p .writing-error { (ERROR_TEXT) }
        a .btn .btn-secondary .writing-cta href=(profile_url)
          target="_blank" rel="noopener noreferrer" {
          (CTA_TEXT)
        }
      },
    }
  }
}

fn tile_fragment(tile: &Tile) -> Markup {
  match tile {
    Tile::Skeleton => skeleton_tile(),
    Tile::Post(post) => post_tile(post),
  }
}

pub fn skeleton_tile() -> Markup {
  html! {
    div .post-tile .skeleton {
      span .tag-pill .skeleton-block {}
      div .skeleton-line {}
      div .skeleton-line .short {}
      div .skeleton-line {}
      div .skeleton-line .short {}
    }
  }
}

pub fn post_tile(post: &PostRecord) -> Markup {
  html! {
    a .post-tile href=(post.link) target="_blank" rel="noopener noreferrer" {
      span .tag-pill { (post.tag) }
      h3 .post-title { (post.title) }
      p .post-excerpt { (post.excerpt) }
      span .post-date { (post.date) }
    }
  }
}
