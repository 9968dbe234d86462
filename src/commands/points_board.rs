use std::task::{Context, Poll};

use crate::{domain::Club, ports::records::RecordPort};
use tower::Service;

use super::{CommandFuture, DomainLogic, Error};

/// Request for all clubs, ranked by points
pub struct PointsBoardRequest;

impl<R, C> Service<PointsBoardRequest> for DomainLogic<R, C>
where
    R: RecordPort + 'static,
    C: Send + Sync + 'static,
{
    type Response = Vec<Club>;
    type Error = Error;
    type Future = CommandFuture<Vec<Club>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _req: PointsBoardRequest) -> Self::Future {
        let records = self.records.clone();
        Box::pin(async move {
            let mut clubs = records.list_clubs().await?;
            // Stable sort: clubs with the same points keep their source order
            clubs.sort_by(|a, b| b.points.cmp(&a.points));
            Ok(clubs)
        })
    }
}
