//! Offset pagination executor.
//!
//! One predicate value is replayed against two skeletons: a `COUNT(DISTINCT id)`
//! query and an ordered, windowed page query. Joins and ordering are only ever
//! attached to the page query, so the reported total cannot drift from the
//! rows a client can page through.

use sea_orm::{
    sea_query::{Expr, Func, SimpleExpr},
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType, Order, QueryFilter,
    QueryOrder, QuerySelect, RelationDef, Select,
};
use search_core::{Page, PageError, PageRequest, SortDir};

/// One ordering term of the page query.
#[derive(Clone, Debug)]
pub struct OrderSpec {
    pub expr: SimpleExpr,
    pub dir: SortDir,
}

impl OrderSpec {
    pub fn new(expr: impl Into<SimpleExpr>, dir: SortDir) -> Self {
        Self {
            expr: expr.into(),
            dir,
        }
    }
}

/// Page-query-only shape: an optional to-one join and the ordering terms.
///
/// The id tiebreaker is appended by [`paginate_offset`] and must not be listed here.
#[derive(Debug, Default)]
pub struct PagePlan {
    pub join: Option<RelationDef>,
    pub order: Vec<OrderSpec>,
}

fn to_order(dir: SortDir) -> Order {
    match dir {
        SortDir::Asc => Order::Asc,
        SortDir::Desc => Order::Desc,
    }
}

/// Count the distinct rows matching `predicate`, then fetch the requested window.
///
/// When the count is zero the page query is skipped.
pub async fn paginate_offset<E, C>(
    select: Select<E>,
    conn: &C,
    predicate: &Condition,
    plan: PagePlan,
    id_col: E::Column,
    request: PageRequest,
) -> Result<Page<E::Model>, PageError>
where
    E: EntityTrait,
    E::Column: ColumnTrait + Copy,
    C: ConnectionTrait,
{
    if request.size == 0 {
        return Err(PageError::InvalidPageSize);
    }
    let offset = request.offset()?;
    let id_expr: SimpleExpr = Expr::col((E::default(), id_col)).into();

    let total = select
        .clone()
        .filter(predicate.clone())
        .select_only()
        .column_as(SimpleExpr::from(Func::count_distinct(id_expr.clone())), "total")
        .into_tuple::<i64>()
        .one(conn)
        .await
        .map_err(|e| PageError::Db(e.to_string()))?
        .unwrap_or(0);
    let total = u64::try_from(total).unwrap_or(0);

    tracing::debug!(
        total,
        page = request.index,
        size = request.size,
        "count query finished"
    );

    if total == 0 {
        return Ok(Page::empty(request));
    }

    let mut page = select.filter(predicate.clone());
    if let Some(rel) = plan.join {
        page = page.join(JoinType::LeftJoin, rel);
    }
    for spec in plan.order {
        page = page.order_by(spec.expr, to_order(spec.dir));
    }
    let rows = page
        .order_by(id_expr, Order::Asc)
        .offset(offset)
        .limit(request.size)
        .all(conn)
        .await
        .map_err(|e| PageError::Db(e.to_string()))?;

    Ok(Page::new(rows, request, total))
}
