use crate::app::App;
use crate::mpris::MprisHandle;
use crate::transport::PlaybackState;

/// Push the transport snapshot into the MPRIS mirror.
pub fn update_mpris(mpris: &MprisHandle, app: &App, snapshot: &PlaybackState) {
    let track = snapshot.current.and_then(|i| app.tracks.get(i));
    mpris.set_track_metadata(
        track.map(|t| t.title.clone()),
        track.and_then(|t| t.artist.clone()),
    );
    mpris.set_phase(snapshot.phase());
    mpris.set_volume(snapshot.volume as f64);
}
