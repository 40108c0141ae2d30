//! Static stylesheet and script for the viewer page.
//!
//! The server serves these under `/assets/`; standalone pages written by the
//! CLI inline them instead.

/// Viewer stylesheet.
pub const VIEWER_CSS: &str = r#"
* { box-sizing: border-box; }
body {
    margin: 0;
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    background: #f4f6fb;
    color: #2c3e50;
}
.container { max-width: 960px; margin: 0 auto; padding: 24px; }
.viewer-header { display: flex; flex-wrap: wrap; gap: 12px; align-items: baseline; justify-content: space-between; }
.viewer-header h1 { margin: 0; font-size: 1.6rem; }
.metadata { background: #fff; border-radius: 8px; padding: 12px 16px; margin: 16px 0; }
.metadata p { margin: 4px 0; }
.toolbar { display: flex; flex-wrap: wrap; gap: 8px; margin-bottom: 12px; }
.toolbar button, .toolbar a, .export-menu a {
    background: #667eea; color: #fff; border: none; border-radius: 5px;
    padding: 8px 14px; font-size: 14px; cursor: pointer; text-decoration: none;
}
.export-menu { display: flex; flex-wrap: wrap; gap: 8px; margin: 12px 0; }
.export-menu a.export-text { background: #e67e22; }
.export-menu a.export-clipboard { background: #27ae60; }
.export-menu a.export-document { background: #8e44ad; }

.json-tree { background: #fff; border-radius: 8px; padding: 16px; font-family: "SFMono-Regular", Consolas, monospace; font-size: 14px; }
.json-root-label { font-weight: bold; margin-bottom: 8px; }
.json-root-content, .json-content { padding-left: 18px; border-left: 1px dashed #d0d7e2; }
.json-content.collapsed, .media-content.collapsed, .hidden { display: none; }
.json-item { margin: 2px 0; }
.json-key { cursor: pointer; user-select: none; }
.json-key:hover { color: #667eea; }
.json-chevron { display: inline-block; width: 1em; }
.json-count { color: #8492a6; font-size: 12px; }
.json-key-label, .array-index { color: #8e44ad; }
.json-value.string { color: #27ae60; }
.json-value.number { color: #e67e22; }
.json-value.boolean { color: #2980b9; }
.json-value.null, .json-value.unknown, .json-value.truncated { color: #95a5a6; font-style: italic; }

.media-container { display: inline-block; vertical-align: top; background: #f8f9fc; border: 1px solid #e1e6ef; border-radius: 6px; padding: 6px 10px; margin: 2px 0; }
.media-info { display: flex; align-items: center; gap: 8px; }
.media-toggle, .media-link { background: #667eea; color: #fff; border: none; border-radius: 4px; padding: 2px 10px; font-size: 12px; cursor: pointer; text-decoration: none; }
.media-content { margin-top: 8px; }
.experiment-image, .experiment-video { max-width: 100%; max-height: 420px; border-radius: 4px; }
.experiment-image[data-zoom] { cursor: zoom-in; }
.image-modal {
    position: fixed; inset: 0; z-index: 20000; padding: 20px;
    display: flex; justify-content: center; align-items: center;
    background: rgba(0, 0, 0, 0.9); cursor: zoom-out;
}
.image-modal-frame { position: relative; max-width: 90%; max-height: 90%; }
.image-modal-frame img { max-width: 100%; max-height: 85vh; object-fit: contain; border-radius: 10px; box-shadow: 0 10px 30px rgba(0, 0, 0, 0.5); }
.image-modal-caption, .image-modal-close {
    position: absolute; top: -40px; background: rgba(255, 255, 255, 0.9); color: #333;
    border: none; border-radius: 5px; padding: 5px 10px; font-size: 14px;
}
.image-modal-caption { right: 0; }
.image-modal-close { left: 0; cursor: pointer; }
.image-caption, .video-caption, .media-path { color: #8492a6; font-size: 12px; word-break: break-all; }
.media-status { color: #c0392b; font-size: 12px; }
.error-media { color: #c0392b; font-size: 13px; }
.file-icon::before { content: "\1F4C4"; }
.file-icon.file-pdf::before { content: "\1F4D5"; }
.file-icon.file-excel::before, .file-icon.file-csv::before { content: "\1F4CA"; }
.file-icon.file-archive::before { content: "\1F5DC"; }

.error-panel { background: #fff; border-left: 4px solid #c0392b; border-radius: 8px; padding: 20px; margin-top: 24px; }
.error-panel h2 { margin-top: 0; color: #c0392b; }
.error-detail { color: #8492a6; font-family: monospace; word-break: break-all; }
.retry { display: inline-block; margin-top: 12px; }
.clipboard-text { width: 100%; min-height: 360px; font-family: monospace; font-size: 13px; }
.copy-status { margin-left: 8px; color: #27ae60; }
"#;

/// Styles for the printable export page.
pub const PRINT_CSS: &str = r#"
body.printable { font-family: Georgia, "Times New Roman", serif; color: #000; background: #fff; max-width: 800px; margin: 0 auto; padding: 30px; }
.printable .header h1 { border-bottom: 2px solid #333; padding-bottom: 8px; }
.printable .metadata p { margin: 4px 0; }
.printable pre { white-space: pre-wrap; word-break: break-word; font-size: 12px; background: #f7f7f7; padding: 12px; border: 1px solid #ddd; }
.print-controls { text-align: right; }
.print-controls button { background: #667eea; color: #fff; border: none; border-radius: 5px; padding: 10px 18px; cursor: pointer; }
@media print {
    .print-controls { display: none !important; }
    .printable pre { background: none; border: none; }
}
"#;

/// Viewer behavior: branch and preview toggles, the enlarged image view,
/// media load fallback, the clipboard page and the print button. Pure
/// progressive enhancement over the server markup.
pub const VIEWER_JS: &str = r#"
(function () {
    'use strict';

    function setCollapsed(header, collapsed) {
        var content = document.getElementById(header.getAttribute('data-node'));
        if (!content) { return; }
        content.classList.toggle('collapsed', collapsed);
        header.setAttribute('aria-expanded', collapsed ? 'false' : 'true');
        var chevron = header.querySelector('.json-chevron');
        if (chevron) { chevron.innerHTML = collapsed ? '&#9656;' : '&#9662;'; }
    }

    function toggleNode(header) {
        var content = document.getElementById(header.getAttribute('data-node'));
        if (content) { setCollapsed(header, !content.classList.contains('collapsed')); }
    }

    function setAll(collapsed) {
        document.querySelectorAll('[data-node]').forEach(function (header) {
            setCollapsed(header, collapsed);
        });
    }

    function toggleMedia(button) {
        var content = document.getElementById(button.getAttribute('data-media'));
        if (!content) { return; }
        var show = content.classList.contains('collapsed');
        content.classList.toggle('collapsed', !show);
        button.textContent = show ? 'Hide' : button.getAttribute('data-show-label');
        if (!show) {
            content.querySelectorAll('video').forEach(function (video) { video.pause(); });
        }
    }

    function copyText(button) {
        var target = document.getElementById(button.getAttribute('data-copy-target'));
        var status = document.querySelector('.copy-status');
        if (!target) { return; }
        function report(text) { if (status) { status.textContent = text; } }
        function manual() {
            target.focus();
            target.select();
            report('Select the text and copy it manually.');
        }
        if (navigator.clipboard && navigator.clipboard.writeText) {
            navigator.clipboard.writeText(target.value).then(function () {
                report('Copied to clipboard.');
            }, manual);
        } else {
            manual();
        }
    }

    function closeZoom() {
        var modal = document.querySelector('.image-modal');
        if (modal) { modal.remove(); }
    }

    // Built node by node; record text only ever lands in textContent or alt.
    function openZoom(image) {
        closeZoom();
        var modal = document.createElement('div');
        modal.className = 'image-modal';
        modal.setAttribute('role', 'dialog');
        modal.setAttribute('aria-modal', 'true');

        var frame = document.createElement('div');
        frame.className = 'image-modal-frame';
        var full = document.createElement('img');
        full.src = image.currentSrc || image.src;
        full.alt = image.alt;
        var caption = document.createElement('div');
        caption.className = 'image-modal-caption';
        caption.textContent = image.getAttribute('data-caption') || image.alt;
        var close = document.createElement('button');
        close.type = 'button';
        close.className = 'image-modal-close';
        close.textContent = '\u2715 Close';
        close.addEventListener('click', closeZoom);

        frame.appendChild(full);
        frame.appendChild(caption);
        frame.appendChild(close);
        modal.appendChild(frame);
        modal.addEventListener('click', function (event) {
            if (event.target === modal) { closeZoom(); }
        });
        document.body.appendChild(modal);
        close.focus();
    }

    document.addEventListener('click', function (event) {
        if (event.target.closest('.image-modal')) { return; }
        var el = event.target.closest('[data-node], [data-media], [data-expand-all], [data-collapse-all], [data-copy-target], [data-print], [data-zoom]');
        if (!el) { return; }
        if (el.hasAttribute('data-node')) { toggleNode(el); }
        else if (el.hasAttribute('data-media')) { toggleMedia(el); }
        else if (el.hasAttribute('data-expand-all')) { setAll(false); }
        else if (el.hasAttribute('data-collapse-all')) { setAll(true); }
        else if (el.hasAttribute('data-copy-target')) { copyText(el); }
        else if (el.hasAttribute('data-print')) { window.print(); }
        else if (el.hasAttribute('data-zoom')) { openZoom(el); }
    });

    document.addEventListener('keydown', function (event) {
        if (event.key === 'Escape') { closeZoom(); return; }
        if (event.key !== 'Enter' && event.key !== ' ') { return; }
        var header = event.target.closest('[data-node]');
        if (header) { event.preventDefault(); toggleNode(header); }
    });

    // Media errors do not bubble; listen in the capture phase.
    document.addEventListener('error', function (event) {
        var el = event.target;
        if (!el || !el.hasAttribute || !el.hasAttribute('data-fallback')) { return; }
        el.classList.add('hidden');
        var notice = el.parentElement && el.parentElement.querySelector('.error-media');
        if (notice) { notice.classList.remove('hidden'); }
    }, true);
})();
"#;
